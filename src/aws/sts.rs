use std::time::SystemTime;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, retry::RetryConfig};
use aws_credential_types::{
    Credentials as StaticCredentials,
    provider::{ProvideCredentials, SharedCredentialsProvider},
};
use aws_sdk_sts::Client as StsClient;
use aws_types::SdkConfig;
use tracing::{debug, info};

use super::Credentials;
use crate::{
    constants::DEFAULT_AWS_REGION,
    error::{BoxError, HubSpokeError},
};

/// Parameters of a single STS AssumeRole call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub role_session_name: String,
    pub external_id: Option<String>,
}

/// Something that can exchange its own identity for temporary role credentials.
///
/// `scoped` hands back a new context authenticated by the given credentials.
/// The receiver is left untouched, so the base identity is never overwritten
/// by an assumed one.
#[async_trait]
pub trait RoleAssumer: Sized + Send + Sync {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<Credentials, BoxError>;

    fn scoped(&self, credentials: &Credentials) -> Self;
}

/// Options for building the base AWS configuration
#[derive(Debug, Clone)]
pub struct BaseConfigOptions {
    pub region: Option<String>,
    pub retries: u32,
}

/// [`RoleAssumer`] backed by the AWS SDK STS client
#[derive(Debug, Clone)]
pub struct StsRoleAssumer {
    config: SdkConfig,
}

impl StsRoleAssumer {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Load the caller's base identity from the default AWS credential chain
    pub async fn load(options: &BaseConfigOptions) -> Result<Self, HubSpokeError> {
        load_base_config(options).await.map(Self::new)
    }

    /// SDK configuration this context authenticates with
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<Credentials, BoxError> {
        debug!("Role ARN: {}", request.role_arn);
        debug!("Role session name: {}", request.role_session_name);
        debug!("External ID present: {}", request.external_id.is_some());

        let client = StsClient::new(&self.config);

        let response = client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.role_session_name)
            .set_external_id(request.external_id.clone())
            .send()
            .await?;

        let sts_creds = response.credentials().ok_or_else(|| {
            BoxError::from(HubSpokeError::NoCredentials {
                role_arn: request.role_arn.clone(),
            })
        })?;

        Ok(Credentials::from(sts_creds))
    }

    fn scoped(&self, credentials: &Credentials) -> Self {
        let provider = StaticCredentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            Some(credentials.session_token.clone()),
            SystemTime::try_from(credentials.expiration).ok(),
            "AssumeRole",
        );

        Self {
            config: self
                .config
                .to_builder()
                .credentials_provider(SharedCredentialsProvider::new(provider))
                .build(),
        }
    }
}

/// Build the base SDK configuration, resolving the base credentials once.
///
/// Priority for the region: explicit option -> ENV vars -> Config file -> DEFAULT_AWS_REGION.
/// The retry budget is passed to the SDK's standard retry strategy; nothing
/// above this layer retries. The returned config carries the resolved
/// credentials as a static provider, so the hub call does not walk the
/// default chain a second time.
pub async fn load_base_config(options: &BaseConfigOptions) -> Result<SdkConfig, HubSpokeError> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(RetryConfig::standard().with_max_attempts(max_attempts(options.retries)));

    if let Some(region) = &options.region {
        loader = loader.region(Region::new(region.clone()));
    }

    let loaded = loader.load().await;

    let config = match loaded.region() {
        Some(region) => {
            info!("Using region: {}", region);
            loaded
        }
        None => {
            info!(
                "No region configured, using default {} for STS",
                DEFAULT_AWS_REGION
            );
            loaded
                .to_builder()
                .region(Region::new(DEFAULT_AWS_REGION))
                .build()
        }
    };

    let provider = config.credentials_provider().ok_or_else(|| {
        HubSpokeError::Configuration("no AWS credentials provider is configured".to_string())
    })?;

    let base_creds = provider
        .provide_credentials()
        .await
        .map_err(|e| HubSpokeError::Configuration(format!("no usable base credentials: {e}")))?;
    debug!("Base credentials from provider: {:?}", base_creds);

    Ok(config
        .to_builder()
        .credentials_provider(SharedCredentialsProvider::new(base_creds))
        .build())
}

fn max_attempts(retries: u32) -> u32 {
    retries.saturating_add(1)
}
