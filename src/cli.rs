use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    aws::sts::BaseConfigOptions,
    commands::{RunCommand, VersionCommand},
    constants::DEFAULT_AWS_RETRIES,
};

const LONG_ABOUT: &str = "\
Assume an IAM hub role, then IAM spoke role, in AWS.

Useful when you have multiple AWS accounts and connect across them with a
hub-and-spoke model: one account is the hub, the others are spokes. You
manage a single inbound IAM credential that can traverse into every spoke,
instead of one credential per account.

Starting from a base identity (an IAM user, an AWS Identity Center role, an
instance profile, ...) this tool assumes the hub role in the hub account, then
the spoke role in the spoke account, and runs a command with the spoke
credentials in its environment.

Example:

    export ASSUME_ROLE_EXTERNAL_ID=this-is-my-robot
    export ASSUME_ROLE_HUB_ACCOUNT=999999999999
    export ASSUME_ROLE_HUB_ROLE=robot-hub-role
    export ASSUME_ROLE_SPOKE_ROLE=robot-spoke-role

    assume-spoke-role run --spoke-account 888888888888 -- \\
        aws sts get-caller-identity";

#[derive(Debug, Clone, Parser)]
#[command(name = "assume-spoke-role", version, about = "Assume an IAM hub role, then IAM spoke role, in AWS", long_about = LONG_ABOUT)]
pub struct Cli {
    #[arg(
        short = 'r',
        long,
        global = true,
        default_value_t = DEFAULT_AWS_RETRIES,
        help = "Number of times the AWS SDK retries a failed API call"
    )]
    pub retries: u32,

    #[arg(
        long,
        global = true,
        help = "AWS region for STS calls (defaults to the SDK region chain, then us-east-1)"
    )]
    pub region: Option<String>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace incl. AWS SDK wire logging)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(
        about = "Run a command using the spoke role's credentials",
        long_about = "Perform the action of assuming roles and running an action.\n\n\
Use environment variables to store parameter values consistently. CLI options \
take precedence over environment variables."
    )]
    Run(RunCommand),
    #[command(about = "Verbose information about the build")]
    Version(VersionCommand),
}

impl Cli {
    pub fn base_config_options(&self) -> BaseConfigOptions {
        BaseConfigOptions {
            region: self.region.clone(),
            retries: self.retries,
        }
    }

    pub async fn execute(self) -> Result<ExitCode> {
        let options = self.base_config_options();

        match self.command {
            Commands::Run(cmd) => cmd.execute(&options).await,
            Commands::Version(cmd) => {
                cmd.execute();
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
