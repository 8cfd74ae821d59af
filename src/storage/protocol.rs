//! Storage Network Protocol
//!
//! Endpoint paths served by a storage node. The router builds its forwarding
//! URLs from the same constants, so both sides agree on the layout.

// --- API Endpoints ---

/// Lists the level -> backend bindings of the node.
pub const ENDPOINT_STORE_MAPPING: &str = "/store_mapping";
/// Binds (`PUT .../{level}/{route}`) or unbinds (`DELETE .../{level}`) a tier.
pub const ENDPOINT_STORE_CONFIG: &str = "/store_config";
/// Document access: `/store/{key}/{level}`.
pub const ENDPOINT_STORE: &str = "/store";

/// Path of a document on a storage node, with both segments percent-encoded.
pub fn store_path(key: &str, level: &str) -> String {
    format!(
        "{}/{}/{}",
        ENDPOINT_STORE,
        urlencoding::encode(key),
        urlencoding::encode(level)
    )
}

/// Path that binds `level` to `route` on a storage node.
pub fn store_config_path(level: &str, route: &str) -> String {
    format!(
        "{}/{}/{}",
        ENDPOINT_STORE_CONFIG,
        urlencoding::encode(level),
        urlencoding::encode(route)
    )
}
