use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    aws::{
        SpokeCredentialsRequest, hubspoke,
        sts::{BaseConfigOptions, StsRoleAssumer},
    },
    constants::{
        ENV_EXTERNAL_ID, ENV_HUB_ACCOUNT, ENV_HUB_ROLE, ENV_SESSION_STRING, ENV_SPOKE_ACCOUNT,
        ENV_SPOKE_ROLE,
    },
    process,
};

/// Options of `run`. Every flag falls back to its environment variable.
#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    #[arg(
        short = 'e',
        long,
        env = ENV_EXTERNAL_ID,
        help = "The external ID value that is required by your hub and spoke policies, if any"
    )]
    pub external_id: Option<String>,

    #[arg(
        short = 'a',
        long,
        env = ENV_HUB_ACCOUNT,
        help = "The 12-digit AWS account ID containing the HUB policy [Required]"
    )]
    pub hub_account: Option<String>,

    #[arg(
        short = 'H',
        long,
        env = ENV_HUB_ROLE,
        help = "The name of the IAM role to assume in the HUB account [Required]"
    )]
    pub hub_role: Option<String>,

    #[arg(
        short = 's',
        long,
        env = ENV_SPOKE_ACCOUNT,
        help = "The 12-digit AWS account ID containing the SPOKE policy [Required]"
    )]
    pub spoke_account: Option<String>,

    #[arg(
        short = 'S',
        long,
        env = ENV_SPOKE_ROLE,
        help = "The name of the IAM role to assume in the SPOKE account [Required]"
    )]
    pub spoke_role: Option<String>,

    #[arg(
        short = 'I',
        long,
        env = ENV_SESSION_STRING,
        help = "A string that will be part of the resulting User ID in the spoke account"
    )]
    pub session_string: Option<String>,

    #[arg(
        last = true,
        required = true,
        value_name = "COMMAND",
        help = "The command to run using the spoke role, after `--`"
    )]
    pub command: Vec<String>,
}

impl RunCommand {
    /// Collapse flags and environment into a chain request. Empty values
    /// count as unset; validation happens in the resolver.
    pub fn credentials_request(&self) -> SpokeCredentialsRequest {
        let value = |v: &Option<String>| v.clone().unwrap_or_default();

        SpokeCredentialsRequest {
            hub_account_id: value(&self.hub_account),
            hub_role_name: value(&self.hub_role),
            spoke_account_id: value(&self.spoke_account),
            spoke_role_name: value(&self.spoke_role),
            external_id: self.external_id.clone().filter(|id| !id.is_empty()),
            session_string: value(&self.session_string),
        }
    }

    pub async fn execute(self, options: &BaseConfigOptions) -> Result<ExitCode> {
        let request = self.credentials_request();
        request.validate()?;

        let base = StsRoleAssumer::load(options)
            .await
            .context("could not generate a valid AWS configuration object")?;

        let session = hubspoke::get_spoke_credentials(&base, &request)
            .await
            .context("could not generate valid AWS credentials for the 'spoke' account")?;

        let status = process::run_command(&session.credentials, &self.command).await?;

        if !status.success() {
            eprintln!("{}: {}", self.command[0], status);
        }
        info!("Command finished: {}", status);

        Ok(process::exit_code(status))
    }
}
