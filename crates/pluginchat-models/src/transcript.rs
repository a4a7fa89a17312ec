//! Transcript entries and the transient status line.
//!
//! The transcript is append-only: entries are created once and never
//! mutated. The [`StatusLine`] lives outside of it and is overwritten by
//! every lifecycle event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generation::GeneratedFile;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who a transcript line is attributed to.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    /// Text the user submitted.
    User,
    /// A final assistant answer (greeting, "plugin generated" notice).
    Assistant,
    /// Assistant progress narration.
    AssistantStatus,
    /// A failure reported to the user.
    Error,
}

impl Role {
    /// CSS class used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "ai",
            Role::AssistantStatus => "ai-status",
            Role::Error => "error",
        }
    }

    /// Speaker label prefixed to the rendered line.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You:",
            Role::Assistant | Role::AssistantStatus => "AI:",
            Role::Error => "Error:",
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptEntry
// ---------------------------------------------------------------------------

/// Notice shown when the service finished generating.
pub const GENERATED_NOTICE: &str = "Plugin generated!";

/// Content of a transcript line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryBody {
    /// Plain text (user input, narration, errors).
    Text {
        /// Display text, unescaped.
        text: String,
    },
    /// The "plugin generated" notice, optionally followed by a file list.
    Generated {
        /// Produced files; empty renders the notice alone.
        files: Vec<GeneratedFile>,
    },
}

/// One line of the append-only chat history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Speaker.
    pub role: Role,
    /// What is displayed.
    pub body: EntryBody,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// A plain-text entry stamped with the current time.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            body: EntryBody::Text { text: text.into() },
            timestamp: Utc::now(),
        }
    }

    /// The assistant's "plugin generated" entry.
    pub fn generated(files: Vec<GeneratedFile>) -> Self {
        Self {
            role: Role::Assistant,
            body: EntryBody::Generated { files },
            timestamp: Utc::now(),
        }
    }

    /// Plain-text rendering without markup, e.g. `"AI: Plugin generated!"`.
    ///
    /// File lists render one `  - path (N Bytes)` line per file.
    pub fn plain_text(&self) -> String {
        match &self.body {
            EntryBody::Text { text } => format!("{} {text}", self.role.label()),
            EntryBody::Generated { files } => {
                let mut out = format!("{} {GENERATED_NOTICE}", self.role.label());
                for file in files {
                    out.push_str(&format!("\n  - {} ({} Bytes)", file.path, file.size_bytes));
                }
                out
            }
        }
    }
}

// ---------------------------------------------------------------------------
// StatusLine
// ---------------------------------------------------------------------------

/// The transient "in progress" slot shown below the transcript.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum StatusLine {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A request is in flight.
    Pending(String),
}

impl StatusLine {
    /// `true` when the slot is empty.
    pub fn is_idle(&self) -> bool {
        matches!(self, StatusLine::Idle)
    }

    /// The pending text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            StatusLine::Idle => None,
            StatusLine::Pending(text) => Some(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_is_kebab_case() {
        assert_eq!(Role::AssistantStatus.to_string(), "assistant-status");
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn role_from_str() {
        use std::str::FromStr;
        assert_eq!(Role::from_str("error").unwrap(), Role::Error);
        assert!(Role::from_str("system").is_err());
    }

    #[test]
    fn every_role_has_class_and_label() {
        use strum::IntoEnumIterator;
        for role in Role::iter() {
            assert!(!role.css_class().is_empty());
            assert!(role.label().ends_with(':'));
        }
    }

    #[test]
    fn plain_text_of_generated_entry() {
        let entry = TranscriptEntry::generated(vec![GeneratedFile::new("x.xml", 120)]);
        assert_eq!(
            entry.plain_text(),
            "AI: Plugin generated!\n  - x.xml (120 Bytes)"
        );
    }

    #[test]
    fn plain_text_of_error_entry() {
        let entry = TranscriptEntry::text(Role::Error, "boom");
        assert_eq!(entry.plain_text(), "Error: boom");
    }

    #[test]
    fn status_line_defaults_to_idle() {
        let status = StatusLine::default();
        assert!(status.is_idle());
        assert_eq!(status.text(), None);
        assert_eq!(StatusLine::Pending("x".into()).text(), Some("x"));
    }
}
