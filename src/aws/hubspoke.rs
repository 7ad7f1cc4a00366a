//! Hub -> spoke role chaining.
//!
//! The caller's base identity assumes a role in the hub account, and the hub
//! credentials then assume a role in the spoke account. Only the spoke
//! credentials leave this module.

use chrono::Utc;
use tracing::{info, warn};

use super::{
    Credentials,
    sts::{AssumeRoleRequest, RoleAssumer},
};
use crate::{
    constants::{self, APP_NAME},
    error::HubSpokeError,
};

/// Identifiers needed to walk from the base identity to the spoke role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpokeCredentialsRequest {
    pub hub_account_id: String,
    pub hub_role_name: String,
    pub spoke_account_id: String,
    pub spoke_role_name: String,
    /// Shared secret required by the hub and spoke trust policies, if any
    pub external_id: Option<String>,
    /// Shows up in the `UserId` of the resulting identities
    pub session_string: String,
}

/// Result of a successful chain: spoke credentials plus a context that
/// authenticates with them
#[derive(Debug, Clone)]
pub struct SpokeSession<A> {
    pub credentials: Credentials,
    pub context: A,
}

impl SpokeCredentialsRequest {
    /// Reject requests missing any of the four mandatory identifiers
    pub fn validate(&self) -> Result<(), HubSpokeError> {
        let required = [
            ("hub-account", &self.hub_account_id),
            ("hub-role", &self.hub_role_name),
            ("spoke-account", &self.spoke_account_id),
            ("spoke-role", &self.spoke_role_name),
        ];

        if let Some((field, _)) = required.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(HubSpokeError::MissingParameter { field });
        }

        Ok(())
    }

    /// Account IDs that are not 12 digits. They are passed to STS as-is.
    pub fn unusual_account_ids(&self) -> Vec<(&'static str, &str)> {
        [
            ("hub-account", self.hub_account_id.as_str()),
            ("spoke-account", self.spoke_account_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, account_id)| !constants::is_valid_account_id(account_id))
        .collect()
    }

    pub fn hub_role_arn(&self) -> String {
        constants::role_arn(&self.hub_account_id, &self.hub_role_name)
    }

    pub fn spoke_role_arn(&self) -> String {
        constants::role_arn(&self.spoke_account_id, &self.spoke_role_name)
    }

    /// Session name for the hub hop: the session string as-is, or a generated
    /// name when it is empty (STS rejects an empty session name)
    pub fn hub_session_name(&self) -> String {
        match self.session_string.is_empty() {
            true => format!("{APP_NAME}-{}", Utc::now().timestamp_millis()),
            false => self.session_string.clone(),
        }
    }

    /// Session name for the spoke hop. The hyphen is kept even when the
    /// session string is empty; audit tooling matches on this pattern.
    pub fn spoke_session_name(&self) -> String {
        format!("{}-{}", self.spoke_account_id, self.session_string)
    }

    fn external_id(&self) -> Option<String> {
        self.external_id.clone().filter(|id| !id.is_empty())
    }
}

/// Assume the hub role with `base`, then the spoke role with the hub
/// credentials, and return the spoke credentials.
///
/// Each role is assumed exactly once. If the spoke hop fails the hub
/// credentials are dropped with the error.
pub async fn get_spoke_credentials<A: RoleAssumer>(
    base: &A,
    request: &SpokeCredentialsRequest,
) -> Result<SpokeSession<A>, HubSpokeError> {
    request.validate()?;

    for (field, account_id) in request.unusual_account_ids() {
        warn!(
            "--{} '{}' is not a 12-digit AWS account ID",
            field, account_id
        );
    }

    let hub_role_arn = request.hub_role_arn();
    let spoke_role_arn = request.spoke_role_arn();
    let external_id = request.external_id();

    info!("Assuming hub role: {}", hub_role_arn);
    let hub_credentials = base
        .assume_role(&AssumeRoleRequest {
            role_arn: hub_role_arn.clone(),
            role_session_name: request.hub_session_name(),
            external_id: external_id.clone(),
        })
        .await
        .map_err(|source| HubSpokeError::HubAssumeRoleFailed {
            role_arn: hub_role_arn,
            account_id: request.hub_account_id.clone(),
            source,
        })?;

    let hub = base.scoped(&hub_credentials);

    info!("Assuming spoke role: {}", spoke_role_arn);
    let spoke_credentials = hub
        .assume_role(&AssumeRoleRequest {
            role_arn: spoke_role_arn.clone(),
            role_session_name: request.spoke_session_name(),
            external_id,
        })
        .await
        .map_err(|source| HubSpokeError::SpokeAssumeRoleFailed {
            role_arn: spoke_role_arn,
            account_id: request.spoke_account_id.clone(),
            source,
        })?;

    info!(
        "Obtained spoke credentials, expiring at {}",
        spoke_credentials.expiration_string()
    );

    let context = hub.scoped(&spoke_credentials);

    Ok(SpokeSession {
        credentials: spoke_credentials,
        context,
    })
}
