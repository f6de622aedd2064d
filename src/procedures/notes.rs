use serde_json::Value;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::Call;
use crate::logging::Stamp;

pub const DEFAULT_NOTE_TYPE: &str = "reference";
pub const DEFAULT_CONFIDENCE: &str = "medium";

/// Note type whose content is a transcript and gets a generated header.
pub const VIDEO_NOTE_TYPE: &str = "video";

/// Arguments for [`create_note`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub note_type: String,
    pub confidence: String,
    /// Source URL; only used for video notes.
    pub url: Option<String>,
    /// Extra key/value lines for the video header, in display order.
    pub metadata: Vec<(String, String)>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            note_type: DEFAULT_NOTE_TYPE.to_string(),
            confidence: DEFAULT_CONFIDENCE.to_string(),
            url: None,
            metadata: Vec::new(),
        }
    }

    /// Body actually sent: video notes with a URL get the header and footer.
    pub fn body(&self, captured: &Stamp) -> String {
        match &self.url {
            Some(url) if self.note_type == VIDEO_NOTE_TYPE => {
                format_video_content(&self.content, url, &self.metadata, captured)
            }
            _ => self.content.clone(),
        }
    }
}

/// Create a note. Video bodies are stamped with the current UTC time.
pub fn create_note(bridge: &Bridge, note: &NewNote) -> Result<Value> {
    create_note_at(bridge, note, &Stamp::now())
}

pub fn create_note_at(bridge: &Bridge, note: &NewNote, captured: &Stamp) -> Result<Value> {
    let call = Call::new("my/api-create-note")
        .str(&note.title)
        .str(note.body(captured))
        .str(&note.note_type)
        .str(&note.confidence);
    bridge.evaluate(&call)
}

/// Read a note by id, title, or file path, optionally a single section.
pub fn read_note(bridge: &Bridge, identifier: &str, section: Option<&str>) -> Result<Value> {
    let call = Call::new("my/api-read-note")
        .str(identifier)
        .opt_str(section);
    bridge.evaluate(&call)
}

/// A note to link an inbox entry to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedNote<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

/// Record a processed command in the inbox, optionally linked to a note.
pub fn add_inbox_entry(
    bridge: &Bridge,
    command: &str,
    text: &str,
    linked: Option<LinkedNote<'_>>,
) -> Result<Value> {
    let call = Call::new("my/api-add-inbox-entry")
        .str(command)
        .str(text)
        .opt_str(linked.map(|l| l.id))
        .opt_str(linked.map(|l| l.title));
    bridge.evaluate(&call)
}

/// Write a free-form line to the inbox.
pub fn log_to_inbox(bridge: &Bridge, text: &str) -> Result<Value> {
    bridge.evaluate(&Call::new("my/api-log-to-inbox").str(text))
}

pub fn format_video_content(
    transcript: &str,
    url: &str,
    metadata: &[(String, String)],
    captured: &Stamp,
) -> String {
    let mut out = String::with_capacity(transcript.len() + 256);
    out.push_str("* Video Information\n");
    out.push_str(&format!("- *URL:* {url}\n"));
    out.push_str(&format!("- *Captured:* {} {}\n", captured.date, captured.time));
    out.push_str("- *Type:* YouTube Video\n");
    for (key, value) in metadata {
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!("- *{}:* {value}\n", title_case(key)));
    }
    out.push_str("\n-----\n\n");
    out.push_str(transcript);
    out.push_str("\n\n-----\n/Note created from YouTube video transcript/");
    out
}

/// Uppercase the first letter of each word, lowercase the rest.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
