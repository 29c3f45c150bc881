use crate::error::CodegenError;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Model processed successfully! Ready for download.";

/// A model file that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Outcome of a drop or a pick, as handed to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSelection {
    Accepted(SelectedFile),
    Rejected(String),
}

/// Byte counters from the upload body. `total` is `None` when the length is
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl UploadProgress {
    pub fn percent(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => Some(self.loaded as f32 / total as f32 * 100.0),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    message: Value,
}

/// The upload response envelope once the identifier has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub id: String,
    pub message: String,
}

impl GenerateResponse {
    /// Parses a 2xx body. Anything that does not carry a usable `id` is a
    /// protocol failure.
    pub fn from_body(body: &str) -> Result<Self, CodegenError> {
        let parsed: Value = serde_json::from_str(body).map_err(|_| CodegenError::MissingId)?;
        // Arrays would otherwise map positionally onto the envelope fields.
        if !parsed.is_object() {
            return Err(CodegenError::MissingId);
        }
        let envelope: Envelope =
            serde_json::from_value(parsed).map_err(|_| CodegenError::MissingId)?;

        let id = truthy_text(&envelope.id).ok_or(CodegenError::MissingId)?;
        let message =
            truthy_text(&envelope.message).unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());

        Ok(Self { id, message })
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().map_or(true, |f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_and_message_are_taken_from_body() {
        let response = GenerateResponse::from_body(r#"{"id":"abc123","message":"done"}"#).unwrap();
        assert_eq!(response.id, "abc123");
        assert_eq!(response.message, "done");
    }

    #[test]
    fn missing_message_uses_default() {
        let response = GenerateResponse::from_body(r#"{"id":"xyz"}"#).unwrap();
        assert_eq!(response.message, DEFAULT_SUCCESS_MESSAGE);

        let response = GenerateResponse::from_body(r#"{"id":"xyz","message":""}"#).unwrap();
        assert_eq!(response.message, DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn numeric_id_is_stringified() {
        let response = GenerateResponse::from_body(r#"{"id":42}"#).unwrap();
        assert_eq!(response.id, "42");
    }

    #[test]
    fn falsy_or_missing_id_is_rejected() {
        for body in [r#"{}"#, r#"{"id":""}"#, r#"{"id":null}"#, r#"{"id":0}"#, r#"{"id":false}"#] {
            assert!(
                matches!(GenerateResponse::from_body(body), Err(CodegenError::MissingId)),
                "body {} should be rejected",
                body
            );
        }
    }

    #[test]
    fn non_json_body_is_a_missing_id() {
        assert!(matches!(
            GenerateResponse::from_body("<html>oops</html>"),
            Err(CodegenError::MissingId)
        ));
        assert!(matches!(
            GenerateResponse::from_body("[1,2]"),
            Err(CodegenError::MissingId)
        ));
    }

    #[test]
    fn progress_needs_a_known_total() {
        let p = UploadProgress { loaded: 50, total: Some(200) };
        assert_eq!(p.percent(), Some(25.0));
        assert_eq!(UploadProgress { loaded: 50, total: None }.percent(), None);
        assert_eq!(UploadProgress { loaded: 0, total: Some(0) }.percent(), None);
    }
}
