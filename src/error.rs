use thiserror::Error;

/// Boxed error returned by an STS backend
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of the hub -> spoke credential chain and of the launched command
#[derive(Debug, Error)]
pub enum HubSpokeError {
    #[error("missing required parameter: --{field}")]
    MissingParameter { field: &'static str },

    #[error("could not generate a valid AWS configuration: {0}")]
    Configuration(String),

    #[error("error assuming '{role_arn}' role in hub account {account_id}")]
    HubAssumeRoleFailed {
        role_arn: String,
        account_id: String,
        #[source]
        source: BoxError,
    },

    #[error("error assuming '{role_arn}' role in spoke account {account_id}")]
    SpokeAssumeRoleFailed {
        role_arn: String,
        account_id: String,
        #[source]
        source: BoxError,
    },

    #[error("AWS STS returned no credentials for '{role_arn}'")]
    NoCredentials { role_arn: String },

    #[error("failed to launch '{program}'")]
    SubprocessLaunchFailed {
        program: String,
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_parameter_names_flag() {
        let err = HubSpokeError::MissingParameter {
            field: "hub-account",
        };
        assert_eq!(err.to_string(), "missing required parameter: --hub-account");
    }

    #[test]
    fn test_hub_failure_keeps_context_and_source() {
        let err = HubSpokeError::HubAssumeRoleFailed {
            role_arn: "arn:aws:iam::999999999999:role/robot-hub-role".to_string(),
            account_id: "999999999999".to_string(),
            source: "AccessDenied".into(),
        };

        let message = err.to_string();
        assert!(message.contains("arn:aws:iam::999999999999:role/robot-hub-role"));
        assert!(message.contains("hub account 999999999999"));
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("AccessDenied"));
    }
}
