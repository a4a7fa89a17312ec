//! Error types for the `pluginchat-models` crate.

/// Errors produced when decoding protocol messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The raw message was not valid JSON or did not match the expected shape.
    #[error("malformed message: {reason}")]
    MalformedMessage {
        /// Human-readable explanation.
        reason: String,
    },

    /// The message carried a `command` tag this side does not understand.
    #[error("unknown command \"{command}\"")]
    UnknownCommand {
        /// The unrecognised command tag.
        command: String,
    },

    /// A required field was missing.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}
