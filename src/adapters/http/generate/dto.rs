//! HTTP DTOs for the model proxy.

use serde::Deserialize;

use crate::application::GenerateTextCommand;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub system_instruction: Option<String>,
    #[serde(default)]
    pub user_query: Option<String>,
}

impl From<GenerateRequest> for GenerateTextCommand {
    fn from(req: GenerateRequest) -> Self {
        Self {
            system_instruction: req.system_instruction,
            user_query: req.user_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_fields() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"systemInstruction": "Be brief.", "userQuery": "Hello"}"#,
        )
        .unwrap();
        let cmd = GenerateTextCommand::from(req);
        assert_eq!(cmd.system_instruction.as_deref(), Some("Be brief."));
        assert_eq!(cmd.user_query.as_deref(), Some("Hello"));
    }

    #[test]
    fn fields_are_optional() {
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_query.is_none());
    }
}
