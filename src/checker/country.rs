// src/checker/country.rs
// =============================================================================
// Maps check-network node ids to country names.
//
// Node ids look like "us1.node.check-host.net" — the first two letters
// usually (not always) name the hosting country. The table below is closed
// and hand-maintained; growing it is a data change, not a code change.
// Unknown prefixes pass through as the raw node id so nothing is silently
// dropped.
// =============================================================================

// Two-letter node prefix -> display name
const COUNTRY_TABLE: &[(&str, &str)] = &[
    ("us", "USA"),
    ("ch", "Switzerland"),
    ("pt", "Portugal"),
    ("ru", "Russia"),
    ("de", "Germany"),
    ("in", "India"),
    ("uk", "United Kingdom"),
    ("fr", "France"),
    ("jp", "Japan"),
];

/// Resolves a node id to a country name via its two-letter prefix,
/// case-insensitively. Ids with an unknown prefix come back unchanged.
pub fn country_for_node(node_id: &str) -> String {
    let prefix: String = node_id.chars().take(2).collect::<String>().to_lowercase();

    COUNTRY_TABLE
        .iter()
        .find(|(code, _)| *code == prefix)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| node_id.to_string())
}
