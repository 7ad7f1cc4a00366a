use std::process::{ExitCode, ExitStatus, Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    aws::Credentials,
    constants::{
        AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SECURITY_TOKEN, AWS_SESSION_EXPIRATION,
        AWS_SESSION_TOKEN,
    },
    error::HubSpokeError,
};

/// Environment variables that expose `creds` to a child process.
///
/// The session token is exported twice: `AWS_SECURITY_TOKEN` is the legacy
/// name still read by older tools.
pub fn credential_env(creds: &Credentials) -> [(&'static str, String); 5] {
    [
        (AWS_ACCESS_KEY_ID, creds.access_key_id.clone()),
        (AWS_SECRET_ACCESS_KEY, creds.secret_access_key.clone()),
        (AWS_SECURITY_TOKEN, creds.session_token.clone()),
        (AWS_SESSION_TOKEN, creds.session_token.clone()),
        (AWS_SESSION_EXPIRATION, creds.expiration_string()),
    ]
}

/// Run `args[0]` with the remaining arguments, the parent environment plus
/// the spoke credentials, and the parent's stdio.
pub async fn run_command(
    creds: &Credentials,
    args: &[String],
) -> Result<ExitStatus, HubSpokeError> {
    let (program, program_args) = args
        .split_first()
        .ok_or_else(|| HubSpokeError::SubprocessLaunchFailed {
            program: String::new(),
            source: "no command given; pass it after `--`".into(),
        })?;

    info!("Running command: {}", program);
    debug!("Arguments: {:?}", program_args);

    let status = Command::new(program)
        .args(program_args)
        .envs(credential_env(creds))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| HubSpokeError::SubprocessLaunchFailed {
            program: program.clone(),
            source: e.into(),
        })?;

    debug!("Command exited with {}", status);
    Ok(status)
}

/// Map a child's exit status to this process's exit code
pub fn exit_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return ExitCode::from(u8::try_from(code).unwrap_or(1));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ExitCode::from(u8::try_from(128 + signal).unwrap_or(1));
        }
    }

    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_types::DateTime;
    use std::collections::HashMap;

    fn spoke_credentials() -> Credentials {
        Credentials {
            access_key_id: "ASIASPOKE".to_string(),
            secret_access_key: "spoke-secret".to_string(),
            session_token: "spoke-token".to_string(),
            expiration: DateTime::from_secs(1_234_567_890),
        }
    }

    #[test]
    fn test_credential_env() {
        let env: HashMap<_, _> = credential_env(&spoke_credentials()).into_iter().collect();

        assert_eq!(env.len(), 5);
        assert_eq!(env["AWS_ACCESS_KEY_ID"], "ASIASPOKE");
        assert_eq!(env["AWS_SECRET_ACCESS_KEY"], "spoke-secret");
        assert_eq!(env["AWS_SECURITY_TOKEN"], "spoke-token");
        assert_eq!(env["AWS_SESSION_TOKEN"], "spoke-token");
        assert_eq!(env["AWS_SESSION_EXPIRATION"], "2009-02-13T23:31:30Z");
    }

    #[tokio::test]
    async fn test_run_command_without_args_fails() {
        let err = run_command(&spoke_credentials(), &[]).await.unwrap_err();
        assert!(matches!(err, HubSpokeError::SubprocessLaunchFailed { .. }));
    }

    #[tokio::test]
    async fn test_run_command_missing_program_fails() {
        let args = vec!["assume-spoke-role-no-such-program".to_string()];

        let err = run_command(&spoke_credentials(), &args).await.unwrap_err();

        match err {
            HubSpokeError::SubprocessLaunchFailed { program, .. } => {
                assert_eq!(program, "assume-spoke-role-no-such-program")
            }
            other => panic!("Expected SubprocessLaunchFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_exports_credentials() {
        let args = vec![
            "sh".to_string(),
            "-c".to_string(),
            r#"[ "$AWS_ACCESS_KEY_ID" = ASIASPOKE ] && [ "$AWS_SECURITY_TOKEN" = "$AWS_SESSION_TOKEN" ] && [ "$AWS_SESSION_EXPIRATION" = 2009-02-13T23:31:30Z ]"#.to_string(),
        ];

        let status = run_command(&spoke_credentials(), &args).await.unwrap();

        assert!(status.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_reports_child_exit_status() {
        let args = vec!["sh".to_string(), "-c".to_string(), "exit 7".to_string()];

        let status = run_command(&spoke_credentials(), &args).await.unwrap();

        assert_eq!(status.code(), Some(7));
    }
}
