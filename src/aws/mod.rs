use std::fmt;

use aws_smithy_types::{DateTime, date_time::Format};

pub mod hubspoke;
pub mod sts;

/// AWS temporary credentials structure
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

impl Credentials {
    /// Expiration as an RFC 3339 timestamp
    pub fn expiration_string(&self) -> String {
        self.expiration
            .fmt(Format::DateTime)
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

impl From<&aws_sdk_sts::types::Credentials> for Credentials {
    fn from(sts_creds: &aws_sdk_sts::types::Credentials) -> Self {
        Self {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
        }
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

pub use hubspoke::{SpokeCredentialsRequest, SpokeSession};
pub use sts::{AssumeRoleRequest, RoleAssumer, StsRoleAssumer};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credentials {
        Credentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "very-secret".to_string(),
            session_token: "very-token".to_string(),
            expiration: DateTime::from_secs(1_234_567_890),
        }
    }

    #[test]
    fn test_expiration_string_is_rfc3339() {
        assert_eq!(sample().expiration_string(), "2009-02-13T23:31:30Z");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("ASIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("very-token"));
    }

    #[test]
    fn test_from_sts_credentials() {
        let sts_creds = aws_sdk_sts::types::Credentials::builder()
            .access_key_id("ASIAEXAMPLE")
            .secret_access_key("very-secret")
            .session_token("very-token")
            .expiration(DateTime::from_secs(1_234_567_890))
            .build()
            .unwrap();

        assert_eq!(Credentials::from(&sts_creds), sample());
    }
}
