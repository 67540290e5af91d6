//! Values that cross the bridge.
//!
//! Everything here is plain data: paths, strings, and number sequences.
//! Nothing that crosses the boundary carries a handle or a callback.

use serde::{Deserialize, Serialize};

use super::errors::BridgeError;

// ─── Data Model ──────────────────────────────────────────────────────────────

/// Absolute path of the folder the user picked, or `None` on cancel.
pub type FolderSelection = Option<String>;

/// Outcome of a single summarize invocation.
///
/// On the wire this is `{success: true, summary, embedding}` or
/// `{success: false, error}`. Decoding rejects mixed or partial shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SummarizeWire", try_from = "SummarizeWire")]
pub enum SummarizeResult {
    Success { summary: String, embedding: Vec<f64> },
    Failure { error: String },
}

impl SummarizeResult {
    /// Build a failure result from anything displayable.
    pub fn failure(error: impl std::fmt::Display) -> Self {
        SummarizeResult::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SummarizeResult::Success { .. })
    }

    /// Text shown in the summary panel: the summary, or `Error: <message>`.
    pub fn display_text(&self) -> String {
        match self {
            SummarizeResult::Success { summary, .. } => summary.clone(),
            SummarizeResult::Failure { error } => format!("Error: {error}"),
        }
    }
}

/// Flat wire form of [`SummarizeResult`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SummarizeWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    embedding: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<SummarizeResult> for SummarizeWire {
    fn from(result: SummarizeResult) -> Self {
        match result {
            SummarizeResult::Success { summary, embedding } => SummarizeWire {
                success: true,
                summary: Some(summary),
                embedding: Some(embedding),
                error: None,
            },
            SummarizeResult::Failure { error } => SummarizeWire {
                success: false,
                summary: None,
                embedding: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<SummarizeWire> for SummarizeResult {
    type Error = String;

    fn try_from(wire: SummarizeWire) -> Result<Self, Self::Error> {
        match wire {
            SummarizeWire {
                success: true,
                summary: Some(summary),
                embedding: Some(embedding),
                error: None,
            } => Ok(SummarizeResult::Success { summary, embedding }),
            SummarizeWire {
                success: false,
                summary: None,
                embedding: None,
                error: Some(error),
            } => Ok(SummarizeResult::Failure { error }),
            SummarizeWire { success: true, .. } => {
                Err("success result must carry exactly `summary` and `embedding`".into())
            }
            SummarizeWire { success: false, .. } => {
                Err("failure result must carry exactly `error`".into())
            }
        }
    }
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// The closed set of capabilities the UI may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ChooseFolder,
    SummarizeNow,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::ChooseFolder, Capability::SummarizeNow];

    /// Wire name used in the `cmd` field.
    pub fn name(self) -> &'static str {
        match self {
            Capability::ChooseFolder => "choose-folder",
            Capability::SummarizeNow => "summarize-now",
        }
    }
}

/// Arguments for `summarize-now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SummarizeArgs {
    pub folder_path: String,
}

/// A request from the UI surface, decoded strictly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "args", rename_all = "kebab-case", deny_unknown_fields)]
pub enum BridgeRequest {
    ChooseFolder,
    SummarizeNow(SummarizeArgs),
}

impl BridgeRequest {
    pub fn capability(&self) -> Capability {
        match self {
            BridgeRequest::ChooseFolder => Capability::ChooseFolder,
            BridgeRequest::SummarizeNow(_) => Capability::SummarizeNow,
        }
    }

    /// Decode the argument object of a command whose name the transport
    /// already resolved (Tauri IPC routes by command name).
    ///
    /// The whole object is checked: `choose-folder` takes nothing, and
    /// `summarize-now` takes exactly `{folderPath}`.
    pub fn from_invoke(
        capability: Capability,
        args: serde_json::Value,
    ) -> Result<Self, BridgeError> {
        match capability {
            Capability::ChooseFolder => match args {
                serde_json::Value::Null => Ok(BridgeRequest::ChooseFolder),
                serde_json::Value::Object(map) if map.is_empty() => Ok(BridgeRequest::ChooseFolder),
                other => Err(BridgeError::InvalidPayload {
                    reason: format!("choose-folder takes no arguments, got {other}"),
                }),
            },
            Capability::SummarizeNow => {
                Ok(BridgeRequest::SummarizeNow(serde_json::from_value(args)?))
            }
        }
    }
}

/// A reply sent back to the UI surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    Summary(SummarizeResult),
    Folder(FolderSelection),
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let result = SummarizeResult::Success {
            summary: "s".into(),
            embedding: vec![0.5],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "summary": "s", "embedding": [0.5]})
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let value = serde_json::to_value(SummarizeResult::failure("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_partial_success_rejected() {
        let decoded: Result<SummarizeResult, _> =
            serde_json::from_value(json!({"success": true, "summary": "no embedding"}));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_mixed_failure_rejected() {
        let decoded: Result<SummarizeResult, _> = serde_json::from_value(
            json!({"success": false, "error": "x", "summary": "y"}),
        );
        assert!(decoded.is_err());
    }

    #[test]
    fn test_display_text() {
        let ok = SummarizeResult::Success {
            summary: "hello".into(),
            embedding: vec![],
        };
        assert_eq!(ok.display_text(), "hello");
        assert_eq!(
            SummarizeResult::failure("down").display_text(),
            "Error: down"
        );
    }

    #[test]
    fn test_decode_choose_folder() {
        let req: BridgeRequest = serde_json::from_value(json!({"cmd": "choose-folder"})).unwrap();
        assert_eq!(req, BridgeRequest::ChooseFolder);
        assert_eq!(req.capability().name(), "choose-folder");
    }

    #[test]
    fn test_decode_summarize_now() {
        let req: BridgeRequest = serde_json::from_value(
            json!({"cmd": "summarize-now", "args": {"folderPath": "/a/b"}}),
        )
        .unwrap();
        assert_eq!(
            req,
            BridgeRequest::SummarizeNow(SummarizeArgs {
                folder_path: "/a/b".into()
            })
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        let decoded: Result<BridgeRequest, _> =
            serde_json::from_value(json!({"cmd": "read-file", "args": {"path": "/etc/passwd"}}));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_extra_argument_rejected() {
        let decoded: Result<BridgeRequest, _> = serde_json::from_value(json!({
            "cmd": "summarize-now",
            "args": {"folderPath": "/a", "url": "http://evil"}
        }));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_wrong_argument_type_rejected() {
        let decoded: Result<BridgeRequest, _> =
            serde_json::from_value(json!({"cmd": "summarize-now", "args": {"folderPath": 7}}));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_invoke_args_decoded_strictly() {
        let req = BridgeRequest::from_invoke(Capability::SummarizeNow, json!({"folderPath": "/a"}))
            .unwrap();
        assert_eq!(
            req,
            BridgeRequest::SummarizeNow(SummarizeArgs {
                folder_path: "/a".into()
            })
        );

        let err = BridgeRequest::from_invoke(
            Capability::SummarizeNow,
            json!({"folderPath": "/a", "url": "http://evil"}),
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidPayload { .. }));

        let err = BridgeRequest::from_invoke(Capability::SummarizeNow, json!({})).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidPayload { .. }));
    }

    #[test]
    fn test_invoke_choose_folder_takes_no_args() {
        assert_eq!(
            BridgeRequest::from_invoke(Capability::ChooseFolder, json!({})).unwrap(),
            BridgeRequest::ChooseFolder
        );
        assert_eq!(
            BridgeRequest::from_invoke(Capability::ChooseFolder, serde_json::Value::Null).unwrap(),
            BridgeRequest::ChooseFolder
        );
        let err = BridgeRequest::from_invoke(Capability::ChooseFolder, json!({"defaultPath": "/"}))
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidPayload { .. }));
    }

    #[test]
    fn test_folder_response_serializes_as_plain_value() {
        let some = serde_json::to_value(BridgeResponse::Folder(Some("/x".into()))).unwrap();
        let none = serde_json::to_value(BridgeResponse::Folder(None)).unwrap();
        assert_eq!(some, json!("/x"));
        assert_eq!(none, json!(null));
    }
}
