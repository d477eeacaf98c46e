// src/checker/classify.rs
// =============================================================================
// Turns the check network's raw per-node answers into a list of active nodes.
//
// The wire shape is a JSON object mapping node ids to arrays of positional
// 5-element arrays:
//
//   { "us1.node": [[1, 0.07, "OK", 200, "1.2.3.4"]], ... }
//
// Only the first element of each node's array matters. It is validated here,
// at the parse boundary, into a fixed-arity NodeReport; nodes whose entry is
// missing, empty, or malformed are skipped rather than failing the batch.
// =============================================================================

use serde_json::{Map, Value};

/// One vantage point's answer, decoded from the positional
/// `[success_flag, elapsed, message, http_status, ip]` array.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeReport {
    pub success: i64,
    pub elapsed: f64,
    pub message: String,
    /// null on the wire when the node never got an HTTP response
    pub status: Option<i64>,
    pub ip: String,
}

impl NodeReport {
    /// Decodes one positional result array.
    ///
    /// Returns None when the entry cannot be trusted: not an array, no
    /// coercible success flag, or a status that is present but not numeric.
    /// The informational fields (elapsed, message, ip) are decoded leniently
    /// since nothing downstream branches on them.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let fields = entry.as_array()?;
        let success = coerce_int(fields.first()?)?;
        let status = match fields.get(3) {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce_int(value)?),
        };

        Some(NodeReport {
            success,
            elapsed: fields.get(1).and_then(coerce_float).unwrap_or(0.0),
            message: fields
                .get(2)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            status,
            ip: fields
                .get(4)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// A node counts as active iff it reported success and a final HTTP
    /// status in the 200-399 range.
    pub fn is_active(&self) -> bool {
        self.success == 1 && matches!(self.status, Some(code) if (200..400).contains(&code))
    }
}

/// Picks the active node ids out of a poll result.
///
/// Per node: skip when the value is not an array, is empty, or its first
/// element is falsy; otherwise decode the first element and keep the node id
/// when the report says active. Nodes that did not respond and nodes that
/// actively failed land in the same skip bucket.
pub fn classify(results: &Map<String, Value>) -> Vec<String> {
    let mut active_nodes = Vec::new();

    for (node_id, entry) in results {
        let Some(reports) = entry.as_array() else { continue };
        let Some(first) = reports.first() else { continue };
        if !json_is_truthy(first) {
            continue;
        }

        match NodeReport::from_entry(first) {
            Some(report) if report.is_active() => active_nodes.push(node_id.clone()),
            _ => {}
        }
    }

    active_nodes
}

/// Python-style truthiness for JSON values: null, false, 0, "", [] and {}
/// are all falsy. Used both here (per-node entries) and by the poller
/// (whole response bodies).
pub(crate) fn json_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

// Lenient integer coercion: JSON numbers (floats truncate), numeric
// strings, and bools all count; everything else is a decode failure
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_classify_keeps_successful_nodes() {
        let results = as_map(json!({
            "us1.node": [[1, 0.1, "OK", 200, "1.2.3.4"]],
            "in2.node": [[1, 0.1, "OK", 200, "5.6.7.8"]],
        }));
        let mut active = classify(&results);
        active.sort();
        assert_eq!(active, vec!["in2.node", "us1.node"]);
    }

    #[test]
    fn test_classify_rejects_failed_and_error_statuses() {
        let results = as_map(json!({
            "us1.node": [[0, 0.1, "connect timeout", null, "1.2.3.4"]],
            "de1.node": [[1, 0.2, "OK", 500, "9.9.9.9"]],
            "fr1.node": [[1, 0.2, "OK", 404, "8.8.8.8"]],
        }));
        assert!(classify(&results).is_empty());
    }

    #[test]
    fn test_classify_accepts_redirect_statuses() {
        let results = as_map(json!({
            "jp4.node": [[1, 0.3, "Moved", 301, "4.4.4.4"]],
        }));
        assert_eq!(classify(&results), vec!["jp4.node"]);
    }

    #[test]
    fn test_classify_skips_empty_and_malformed_entries() {
        let results = as_map(json!({
            "us1.node": [],
            "us2.node": null,
            "us3.node": [null],
            "us4.node": [["not-a-number", 0.1, "OK", 200, "1.1.1.1"]],
            "us5.node": [[1, 0.1, "OK", "weird", "1.1.1.1"]],
            "us6.node": "garbage",
            "ch1.node": [[1, 0.1, "OK", 200, "2.2.2.2"]],
        }));
        assert_eq!(classify(&results), vec!["ch1.node"]);
    }

    #[test]
    fn test_classify_coerces_string_flags_and_statuses() {
        let results = as_map(json!({
            "pt1.node": [["1", 0.1, "OK", "302", "3.3.3.3"]],
        }));
        assert_eq!(classify(&results), vec!["pt1.node"]);
    }

    #[test]
    fn test_node_report_decodes_all_fields() {
        let report = NodeReport::from_entry(&json!([1, 0.25, "OK", 200, "1.2.3.4"])).unwrap();
        assert_eq!(
            report,
            NodeReport {
                success: 1,
                elapsed: 0.25,
                message: "OK".to_string(),
                status: Some(200),
                ip: "1.2.3.4".to_string(),
            }
        );
        assert!(report.is_active());
    }

    #[test]
    fn test_node_report_null_status_is_not_active() {
        let report = NodeReport::from_entry(&json!([1, 0.25, "no reply", null, ""])).unwrap();
        assert_eq!(report.status, None);
        assert!(!report.is_active());
    }

    #[test]
    fn test_json_is_truthy() {
        assert!(!json_is_truthy(&json!(null)));
        assert!(!json_is_truthy(&json!(false)));
        assert!(!json_is_truthy(&json!(0)));
        assert!(!json_is_truthy(&json!("")));
        assert!(!json_is_truthy(&json!([])));
        assert!(!json_is_truthy(&json!({})));
        assert!(json_is_truthy(&json!({"k": 1})));
        assert!(json_is_truthy(&json!([0])));
        assert!(json_is_truthy(&json!("x")));
    }
}
