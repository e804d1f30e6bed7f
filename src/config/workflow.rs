//! Workflow collaborator configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the external reminder-workflow collaborator.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WorkflowConfig {
    /// Callback URL the collaborator invokes to run the reminder flow.
    /// Optional: when unset, dispatch is logged only.
    pub reminder_callback_url: Option<String>,
}

impl WorkflowConfig {
    /// Validate workflow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.reminder_callback_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWorkflowUrl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_url_is_valid() {
        assert!(WorkflowConfig::default().validate().is_ok());
    }

    #[test]
    fn test_http_url_is_valid() {
        let config = WorkflowConfig {
            reminder_callback_url: Some(
                "https://example.com/api/v1/workflows/subscription/reminder".to_string(),
            ),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let config = WorkflowConfig {
            reminder_callback_url: Some("ftp://example.com/reminder".to_string()),
        };
        assert!(config.validate().is_err());
    }
}
