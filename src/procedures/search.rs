use serde_json::Value;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::Call;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_CUTOFF: f64 = 0.55;

/// Search with surrounding context for each hit.
pub fn contextual_search(bridge: &Bridge, query: &str, limit: i64) -> Result<Value> {
    let call = Call::new("my/api-contextual-search").str(query).int(limit);
    bridge.evaluate(&call)
}

/// Vector search over note embeddings; `cutoff` is the similarity floor (0.0-1.0).
pub fn semantic_search(bridge: &Bridge, query: &str, limit: i64, cutoff: f64) -> Result<Value> {
    let call = Call::new("my/api-semantic-search")
        .str(query)
        .int(limit)
        .float(cutoff);
    bridge.evaluate(&call)
}

/// Title and content search.
pub fn search_notes(bridge: &Bridge, query: &str) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-search-notes").str(query))
}
