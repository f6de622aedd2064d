//! Typed calls into the remote org-roam API.
//!
//! Each function only shapes arguments into a [`Call`](crate::expr::Call)
//! and picks structured or text decoding. Remote procedure names are the
//! remote side's contract and appear here verbatim.

/// Daily-note entries and content.
pub mod daily;
/// Embedding generation and buffer saving.
pub mod embeddings;
/// Database sync and task-state changes.
pub mod maintenance;
/// Structured node types: person, project, idea, admin.
pub mod nodes;
/// Note creation, reading, and inbox logging.
pub mod notes;
/// Contextual, semantic, and basic search.
pub mod search;
/// Proactive surfacing: projects, follow-ups, digests.
pub mod surfacing;

use serde_json::Value;

use crate::error::Result;

/// Turn the no-value sentinel into `Ok(None)`.
///
/// Only for procedures documented to return `nil` on success.
pub fn accept_no_value(result: Result<Value>) -> Result<Option<Value>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_no_value() => Ok(None),
        Err(e) => Err(e),
    }
}
