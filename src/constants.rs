/// Binary name, also used as the prefix of generated hub session names
pub const APP_NAME: &str = "assume-spoke-role";

/// Environment variable holding the external ID required by the hub and spoke trust policies
pub const ENV_EXTERNAL_ID: &str = "ASSUME_ROLE_EXTERNAL_ID";

/// Environment variable holding the 12-digit hub account ID
pub const ENV_HUB_ACCOUNT: &str = "ASSUME_ROLE_HUB_ACCOUNT";

/// Environment variable holding the hub role name
pub const ENV_HUB_ROLE: &str = "ASSUME_ROLE_HUB_ROLE";

/// Environment variable holding the session string
pub const ENV_SESSION_STRING: &str = "ASSUME_ROLE_SESSION_STRING";

/// Environment variable holding the 12-digit spoke account ID
pub const ENV_SPOKE_ACCOUNT: &str = "ASSUME_ROLE_SPOKE_ACCOUNT";

/// Environment variable holding the spoke role name
pub const ENV_SPOKE_ROLE: &str = "ASSUME_ROLE_SPOKE_ROLE";

/// Number of retries the AWS SDK performs on top of the first attempt
pub const DEFAULT_AWS_RETRIES: u32 = 3;

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Length of an AWS account ID
pub const ACCOUNT_ID_LENGTH: usize = 12;

// Variables exported to the child process.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SECURITY_TOKEN: &str = "AWS_SECURITY_TOKEN";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_SESSION_EXPIRATION: &str = "AWS_SESSION_EXPIRATION";

/// Build an IAM role ARN from an account ID and an unqualified role name
pub fn role_arn(account_id: &str, role_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:role/{role_name}")
}

/// Whether the value looks like an AWS account ID (exactly 12 ASCII digits)
pub fn is_valid_account_id(s: &str) -> bool {
    s.len() == ACCOUNT_ID_LENGTH && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_arn() {
        assert_eq!(
            role_arn("999999999999", "robot-hub-role"),
            "arn:aws:iam::999999999999:role/robot-hub-role"
        );
        assert_eq!(
            role_arn("888888888888", "robot-spoke-role"),
            "arn:aws:iam::888888888888:role/robot-spoke-role"
        );
    }

    #[test]
    fn test_role_arn_keeps_path_segments() {
        assert_eq!(
            role_arn("123456789012", "automation/deployer"),
            "arn:aws:iam::123456789012:role/automation/deployer"
        );
    }

    #[test]
    fn test_valid_account_id() {
        assert!(is_valid_account_id("999999999999"));
        assert!(is_valid_account_id("000000000000"));
    }

    #[test]
    fn test_invalid_account_id() {
        assert!(!is_valid_account_id(""));
        assert!(!is_valid_account_id("12345678901"));
        assert!(!is_valid_account_id("1234567890123"));
        assert!(!is_valid_account_id("12345678901a"));
        assert!(!is_valid_account_id("１２３４５６７８９０１２"));
    }
}
