//! Surface ↔ controller message protocol.
//!
//! Both directions are JSON objects discriminated by a `command` field:
//!
//! ```text
//! surface → controller   {"command":"sendPrompt","text":"…"}
//! controller → surface   {"command":"showStatus","text":"…"}
//!                        {"command":"showError","text":"…"}
//!                        {"command":"showSteps","steps":[…],"files":[…],"msg":…,"error":…}
//! ```
//!
//! This is the exact contract an alternate rendering surface has to honour.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::generation::GeneratedFile;

// ---------------------------------------------------------------------------
// SurfaceMessage
// ---------------------------------------------------------------------------

/// A message sent by the surface to its controller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SurfaceMessage {
    /// The user submitted a prompt.
    SendPrompt {
        /// The prompt exactly as typed.
        text: String,
    },
}

impl SurfaceMessage {
    /// Build a `sendPrompt` message.
    pub fn send_prompt(text: impl Into<String>) -> Self {
        Self::SendPrompt { text: text.into() }
    }

    /// Decode a message received from an out-of-process surface.
    ///
    /// Distinguishes an unknown `command` tag from a structurally broken
    /// message so callers can ignore the former and report the latter.
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| ModelError::MalformedMessage {
                reason: e.to_string(),
            })?;

        let command = value
            .get("command")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ModelError::MissingField {
                field: "command".into(),
            })?
            .to_string();

        if command != "sendPrompt" {
            return Err(ModelError::UnknownCommand { command });
        }

        serde_json::from_value(value).map_err(|e| ModelError::MalformedMessage {
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// PanelEvent
// ---------------------------------------------------------------------------

/// An event pushed by the controller to the surface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelEvent {
    /// Work is in progress; show `text` in the status slot.
    ShowStatus {
        /// Status text.
        text: String,
    },
    /// The request failed as a whole (backend rejection or transport failure).
    ShowError {
        /// Error description.
        text: String,
    },
    /// The generation service answered.
    ShowSteps {
        /// Progress narration, in order.
        #[serde(default)]
        steps: Vec<String>,
        /// Produced files, in order.
        #[serde(default)]
        files: Vec<GeneratedFile>,
        /// Supplementary message, serialized as `null` when absent.
        #[serde(default)]
        msg: Option<String>,
        /// Payload-embedded error, serialized as `null` when absent.
        #[serde(default)]
        error: Option<String>,
    },
}

impl PanelEvent {
    /// Build a `showStatus` event.
    pub fn status(text: impl Into<String>) -> Self {
        Self::ShowStatus { text: text.into() }
    }

    /// Build a `showError` event.
    pub fn error(text: impl Into<String>) -> Self {
        Self::ShowError { text: text.into() }
    }

    /// `true` for the events that end a request (`showSteps`, `showError`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::ShowStatus { .. })
    }

    /// The supplementary `msg` carried by the payload, if any.
    pub fn payload_msg(&self) -> Option<&str> {
        match self {
            Self::ShowSteps { msg, .. } => msg.as_deref(),
            _ => None,
        }
    }

    /// The payload-embedded `error`, if any.
    ///
    /// This is distinct from a `showError` event, which replaces the payload.
    pub fn payload_error(&self) -> Option<&str> {
        match self {
            Self::ShowSteps { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
