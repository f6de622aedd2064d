use serde::Serialize;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::expr::Call;

/// Kind of daily entry; todos are filed under a `TODO` heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    #[default]
    Journal,
    Todo,
}

impl EntryType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "journal" => Some(Self::Journal),
            "todo" => Some(Self::Todo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Todo => "todo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyEntry {
    /// `HH:MM`
    pub timestamp: String,
    pub title: String,
    pub points: Vec<String>,
    pub next_steps: Vec<String>,
    pub tags: Vec<String>,
    pub entry_type: EntryType,
}

impl DailyEntry {
    pub fn heading(&self) -> String {
        match self.entry_type {
            EntryType::Todo => format!("TODO {}", self.title),
            EntryType::Journal => self.title.clone(),
        }
    }
}

/// Append a structured entry to today's daily note; returns the remote message.
pub fn add_daily_entry(bridge: &Bridge, entry: &DailyEntry) -> Result<String> {
    let call = Call::new("my/add-daily-entry-structured")
        .str(&entry.timestamp)
        .str(entry.heading())
        .list(&entry.points)
        .list(&entry.next_steps)
        .list(&entry.tags);
    bridge.evaluate_text(&call)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyContent {
    /// Raw org text of the note.
    pub content: String,
    /// The requested `YYYY-MM-DD`, or `today`.
    pub date: String,
}

/// Content of the daily note for `date`, today when absent.
pub fn get_daily_content(bridge: &Bridge, date: Option<&str>) -> Result<DailyContent> {
    let call = Call::new("my/get-daily-note-content").opt_str(date);
    let content = bridge.evaluate_text(&call)?;
    Ok(DailyContent {
        content,
        date: date
            .filter(|d| !d.is_empty())
            .unwrap_or("today")
            .to_string(),
    })
}
