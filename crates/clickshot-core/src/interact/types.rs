use serde::{Deserialize, Serialize};

/// Which click to send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickModifier {
    #[default]
    None,
    Right,
    Double,
}

impl ClickModifier {
    /// Action name used in results and logs
    pub fn action_name(self) -> &'static str {
        match self {
            ClickModifier::None => "click",
            ClickModifier::Right => "right_click",
            ClickModifier::Double => "double_click",
        }
    }
}

/// Result of an interaction operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResult {
    pub success: bool,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InteractionResult {
    /// Create a successful result with details
    pub fn success(action: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            success: true,
            action: action.into(),
            details: Some(details),
        }
    }
}
