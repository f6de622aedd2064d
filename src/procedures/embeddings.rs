use log::{info, warn};
use serde::Serialize;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::{Arg, Call};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingReport {
    pub count: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEmbeddingReport {
    /// The remote progress message, e.g. `... 12 processed, 1 skipped`.
    pub message: String,
    pub file: String,
}

/// Embed every note lacking a current embedding (all notes when `force`),
/// then save modified org buffers so the embeddings reach disk.
pub fn generate_embeddings(bridge: &Bridge, force: bool) -> Result<EmbeddingReport> {
    let mut call = Call::new("org-roam-semantic-generate-all-embeddings");
    if force {
        call = call.arg(Arg::Bool(true));
    }
    let reply = bridge.evaluate_text(&call)?;
    let count = processed_count(&reply);

    save_buffers(bridge, buffer_is_org_file());
    Ok(EmbeddingReport {
        count,
        message: format!("Generated {count} embeddings"),
    })
}

/// Embed one note file, then save the buffer visiting it.
pub fn generate_note_embedding(bridge: &Bridge, path: &str) -> Result<NoteEmbeddingReport> {
    let call = Call::new("org-roam-semantic-generate-embedding").str(path);
    let message = bridge.evaluate_text(&call)?;

    save_buffers(bridge, buffer_visits(path));
    Ok(NoteEmbeddingReport {
        message,
        file: path.to_string(),
    })
}

/// Either a bare integer or a message containing `<n> processed`; 0 otherwise.
fn processed_count(reply: &str) -> u64 {
    if let Ok(n) = reply.trim().parse() {
        return n;
    }
    let words: Vec<&str> = reply.split_whitespace().collect();
    words
        .windows(2)
        .find(|w| w[1].starts_with("processed"))
        .and_then(|w| w[0].parse().ok())
        .unwrap_or(0)
}

/// `(save-some-buffers t (lambda nil <predicate>))`. Failures are logged only.
fn save_buffers(bridge: &Bridge, predicate: Call) {
    let lambda = Call::new("lambda").nil().arg(Arg::form(predicate));
    let call = Call::new("save-some-buffers")
        .arg(Arg::Bool(true))
        .arg(Arg::form(lambda));
    match bridge.evaluate_text(&call) {
        Ok(_) => info!("saved modified org buffers"),
        Err(e) => warn!("failed to save buffers after embedding: {e}"),
    }
}

fn buffer_file_name() -> Arg {
    Arg::form(Call::new("buffer-file-name"))
}

fn buffer_is_org_file() -> Call {
    Call::new("and").arg(buffer_file_name()).arg(Arg::form(
        Call::new("string-match-p")
            .str(r"\.org$")
            .arg(buffer_file_name()),
    ))
}

fn buffer_visits(path: &str) -> Call {
    Call::new("and").arg(buffer_file_name()).arg(Arg::form(
        Call::new("file-equal-p").arg(buffer_file_name()).str(path),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::testing::{Scripted, bridge};

    #[test]
    fn count_from_integer_or_message() {
        assert_eq!(processed_count("42"), 42);
        assert_eq!(
            processed_count("Embedding generation complete: 20 processed, 130 skipped"),
            20
        );
        assert_eq!(processed_count("nothing to do"), 0);
    }

    #[test]
    fn all_embeddings_then_save() {
        let script = Scripted::default()
            .reply("\"Embedding generation complete: 3 processed, 9 skipped\"\n")
            .reply("nil\n");
        let report = generate_embeddings(&bridge(&script), true).unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.message, "Generated 3 embeddings");
        assert_eq!(
            script.expression(0),
            "(org-roam-semantic-generate-all-embeddings t)"
        );
        assert_eq!(
            script.expression(1),
            r#"(save-some-buffers t (lambda nil (and (buffer-file-name) (string-match-p "\\.org$" (buffer-file-name)))))"#
        );
    }

    #[test]
    fn save_failure_is_not_an_error() {
        let script = Scripted::default().reply("7\n").fail(1, "save failed");
        let report = generate_embeddings(&bridge(&script), false).unwrap();
        assert_eq!(report.count, 7);
        assert_eq!(script.expression(0), "(org-roam-semantic-generate-all-embeddings)");
    }

    #[test]
    fn single_note() {
        let script = Scripted::default()
            .reply("\"Chunk embedding generation complete for a.org: 12 processed, 1 skipped\"")
            .reply("nil");
        let report = generate_note_embedding(&bridge(&script), "/notes/a b.org").unwrap();
        assert_eq!(report.file, "/notes/a b.org");
        assert!(report.message.ends_with("12 processed, 1 skipped"));
        assert_eq!(
            script.expression(0),
            "(org-roam-semantic-generate-embedding \"/notes/a b.org\")"
        );
        assert_eq!(
            script.expression(1),
            "(save-some-buffers t (lambda nil (and (buffer-file-name) \
             (file-equal-p (buffer-file-name) \"/notes/a b.org\"))))"
        );
    }

    #[test]
    fn generation_failure_propagates() {
        let script = Scripted::default().fail(255, "can't find socket");
        assert!(generate_embeddings(&bridge(&script), false).is_err());
        assert_eq!(script.lines().len(), 1);
    }
}
