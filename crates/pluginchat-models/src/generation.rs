//! Generation service request / response bodies.
//!
//! The service receives a single [`GenerationRequest`] per submitted prompt
//! and answers with a [`GenerationResult`]. A result may carry progress
//! steps, produced files, a supplementary message and an error all at once;
//! the panel renders every signal that is present.

use serde::{Deserialize, Deserializer, Serialize};

use crate::protocol::PanelEvent;

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// Body of `POST /generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Free-text description of the desired plugin.
    pub prompt: String,
}

impl GenerationRequest {
    /// Build a request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// GeneratedFile
// ---------------------------------------------------------------------------

/// One file produced by the generation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path of the file relative to the generated plugin root.
    pub path: String,
    /// Size of the file content in bytes.
    pub size_bytes: u64,
}

impl GeneratedFile {
    /// Describe a generated file.
    pub fn new(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationResult
// ---------------------------------------------------------------------------

/// Successful (2xx) response body of the generation service.
///
/// `steps` and `files` default to empty when the service omits them or sends
/// `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Human-readable progress narration, in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    /// Files written by the service, in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<GeneratedFile>,
    /// Optional supplementary message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Optional error reported alongside an otherwise successful response.
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Convert the result into the `showSteps` event pushed to the surface.
    pub fn into_event(self) -> PanelEvent {
        PanelEvent::ShowSteps {
            steps: self.steps,
            files: self.files,
            msg: self.msg,
            error: self.error,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let json = serde_json::to_value(GenerationRequest::new("hl7 to json")).unwrap();
        assert_eq!(json, serde_json::json!({ "prompt": "hl7 to json" }));
    }

    #[test]
    fn full_result_decodes() {
        let raw = r#"{
            "msg": "Plugin files generated and saved successfully.",
            "steps": ["1) Prompt empfangen", "2) Metadaten extrahiert"],
            "files": [{ "path": "plugin.xml", "size_bytes": 120 }]
        }"#;
        let result: GenerationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.files, vec![GeneratedFile::new("plugin.xml", 120)]);
        assert_eq!(
            result.msg.as_deref(),
            Some("Plugin files generated and saved successfully.")
        );
        assert!(result.error.is_none());
    }

    #[test]
    fn missing_and_null_collections_default_to_empty() {
        let result: GenerationResult =
            serde_json::from_str(r#"{ "steps": null, "error": "partial failure" }"#).unwrap();
        assert!(result.steps.is_empty());
        assert!(result.files.is_empty());
        assert_eq!(result.error.as_deref(), Some("partial failure"));
    }

    #[test]
    fn negative_size_is_rejected() {
        let raw = r#"{ "files": [{ "path": "a", "size_bytes": -1 }] }"#;
        assert!(serde_json::from_str::<GenerationResult>(raw).is_err());
    }

    #[test]
    fn into_event_keeps_every_field() {
        let result = GenerationResult {
            steps: vec!["a".into()],
            files: vec![],
            msg: Some("done".into()),
            error: Some("partial failure".into()),
        };
        match result.into_event() {
            PanelEvent::ShowSteps {
                steps,
                files,
                msg,
                error,
            } => {
                assert_eq!(steps, vec!["a".to_string()]);
                assert!(files.is_empty());
                assert_eq!(msg.as_deref(), Some("done"));
                assert_eq!(error.as_deref(), Some("partial failure"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
