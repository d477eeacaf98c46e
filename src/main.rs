// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Gather the URLs to check (args, --input file, or stdin)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the results table (or JSON), optionally export CSV
// 5. Exit with proper code (0 = all reachable, 1 = problems found, 2 = error)
//
// Rust concepts used:
// - async/await: The checking pipeline is built on async network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - the two-tier checking pipeline
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - checker configuration
mod export; // src/export/ - CSV rendering

// Canned HTTP server used by the checker tests
#[cfg(test)]
mod testutil;

use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};
use config::CheckerConfig;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Diagnostic logging; quiet unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = everything reachable
//   Ok(1) = something unreachable or a check failed
//   Err = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            urls,
            input,
            json,
            csv,
            api_base,
            exclude_country,
            poll_attempts,
            poll_interval_secs,
            direct_timeout_secs,
            request_timeout_secs,
        } => {
            let config = CheckerConfig {
                api_base,
                direct_timeout: Duration::from_secs(direct_timeout_secs),
                request_timeout: Duration::from_secs(request_timeout_secs),
                poll_attempts,
                poll_interval: Duration::from_secs(poll_interval_secs),
                excluded_country: exclude_country,
            };
            handle_check(urls, input, json, csv, config).await
        }
        Commands::Probe {
            urls,
            input,
            json,
            timeout_secs,
        } => handle_probe(urls, input, json, Duration::from_secs(timeout_secs)).await,
    }
}

// Handles the 'check' subcommand: the full two-tier check over a batch
async fn handle_check(
    urls: Vec<String>,
    input: Option<PathBuf>,
    json: bool,
    csv: Option<PathBuf>,
    config: CheckerConfig,
) -> Result<i32> {
    let urls = gather_urls(urls, input.as_deref())?;
    if urls.is_empty() {
        println!("⚠️  No URLs provided");
        return Ok(0);
    }

    println!("🌐 Checking {} URL(s)...\n", urls.len());

    let reports = checker::check_urls(&urls, &config).await;

    if json {
        // Serialize results to JSON and print
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&reports);
    }

    if let Some(path) = csv {
        export::write_csv(&path, &reports)?;
        println!("💾 CSV written to {}", path.display());
    }

    let problem_count = reports
        .iter()
        .filter(|r| !r.outcome.is_reachable())
        .count();

    if problem_count > 0 {
        Ok(1) // Exit code 1 = something was unreachable or failed
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// One line of `probe` output, also used for its JSON form
#[derive(Debug, serde::Serialize)]
struct ProbeReport {
    url: String,
    #[serde(flatten)]
    probe: checker::DirectProbe,
}

// Handles the 'probe' subcommand: direct probes only, no fallback tier
async fn handle_probe(
    urls: Vec<String>,
    input: Option<PathBuf>,
    json: bool,
    timeout: Duration,
) -> Result<i32> {
    let urls = gather_urls(urls, input.as_deref())?;
    if urls.is_empty() {
        println!("⚠️  No URLs provided");
        return Ok(0);
    }

    let client = reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client");

    let mut reports = Vec::with_capacity(urls.len());
    for url in &urls {
        let result = checker::probe(&client, url, timeout).await;
        if !json {
            let marker = if result.active { "✅" } else { "❌" };
            println!("{} {:<60} {}", marker, url, result.detail);
        }
        reports.push(ProbeReport {
            url: url.clone(),
            probe: result,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let inactive_count = reports.iter().filter(|r| !r.probe.active).count();
    if inactive_count > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Collects the URLs to check, in priority order:
// positional arguments, then --input file, then stdin.
// Lines are trimmed and blanks dropped; order is preserved.
fn gather_urls(positional: Vec<String>, input: Option<&Path>) -> Result<Vec<String>> {
    let raw = if !positional.is_empty() {
        positional
    } else if let Some(path) = input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read URL list from {}", path.display()))?;
        content.lines().map(str::to_string).collect()
    } else {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read URLs from stdin")?;
        content.lines().map(str::to_string).collect()
    };

    Ok(raw
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

// Prints results as a human-readable table in the terminal
fn print_table(reports: &[checker::UrlReport]) {
    println!();
    println!(
        "{:<52} {:<34} {:<30}",
        "URL", "STATUS", "OTHER ACTIVE COUNTRIES"
    );
    println!("{}", "=".repeat(116));

    for report in reports {
        // Truncate URL if too long for display
        let url_display = if report.url.len() > 49 {
            format!("{}...", &report.url[..49])
        } else {
            report.url.clone()
        };

        println!(
            "{:<52} {:<34} {:<30}",
            url_display,
            report.outcome.label(),
            report.outcome.countries_joined()
        );
    }

    println!();

    // Print summary
    let reachable = reports.iter().filter(|r| r.outcome.is_reachable()).count();
    let failed = reports
        .iter()
        .filter(|r| matches!(r.outcome, checker::CheckOutcome::CheckFailed { .. }))
        .count();
    let unreachable = reports.len() - reachable - failed;

    println!("📊 Summary:");
    println!("   ✅ Reachable: {}", reachable);
    println!("   ❌ Unreachable: {}", unreachable);
    println!("   ⚠️  Check errors: {}", failed);
    println!("   📋 Total: {}", reports.len());
}
