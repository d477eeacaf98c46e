// src/testutil.rs
// =============================================================================
// Test-only canned HTTP server.
//
// Binds a loopback port, replays a scripted sequence of responses (the last
// one repeats once the script runs out), and counts every request it
// receives. The counter is what lets tests assert the call-count contracts:
// no remote traffic after a direct hit, exactly N poll attempts, at most two
// submission requests.
//
// Requests are answered one connection at a time with Connection: close, so
// each client request maps to exactly one accepted connection.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One scripted HTTP response.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl CannedResponse {
    /// 200 with a JSON content type and the given body
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    /// 200 with an HTML content type and the given body
    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html",
            body: body.to_string(),
        }
    }

    /// 200 with an empty body ("result not ready yet")
    pub fn empty() -> Self {
        Self {
            status: 200,
            content_type: "text/html",
            body: String::new(),
        }
    }

    /// Bodyless response with the given status code
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

/// Handle to a running canned server.
pub struct TestServer {
    /// http://127.0.0.1:<port>
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// How many requests the server has answered so far.
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a canned server on an ephemeral loopback port.
///
/// The accept loop lives on a background task and dies with the runtime, so
/// tests do not need to shut it down.
pub async fn serve(responses: Vec<CannedResponse>) -> TestServer {
    assert!(!responses.is_empty(), "serve() needs at least one response");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server address");

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_for_loop = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            let index = hits_for_loop.fetch_add(1, Ordering::SeqCst);
            let reply = responses[index.min(responses.len() - 1)].clone();

            // Drain the request head; the contents never matter to a test
            let mut buf = vec![0u8; 8192];
            let _ = stream.read(&mut buf).await;

            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                reply.status,
                reason_phrase(reply.status),
                reply.content_type,
                reply.body.len(),
            );
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(reply.body.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    TestServer {
        base_url: format!("http://{}", addr),
        hits,
    }
}

// Just enough reason phrases for the statuses tests use
fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}
