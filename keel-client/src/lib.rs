//! Keel ECS Client
//!
//! A small, type-safe client for the two read-only ECS control-plane calls the
//! renderer needs, speaking the JSON 1.1 protocol over HTTPS with Signature V4
//! signing.
//!
//! Callers that only need the operations should depend on the [`ControlPlane`]
//! trait, which makes it easy to substitute an in-memory fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use keel_client::{CredentialSource, EcsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = CredentialSource::Environment.resolve()?;
//!     let client = EcsClient::new("us-east-1", credentials)?;
//!
//!     let res = client.describe_task_definition("web:5").await?;
//!     println!("{:?}", res.task_definition.and_then(|td| td.family));
//!     Ok(())
//! }
//! ```

pub mod credentials;
pub mod error;
mod services;
pub mod signing;
mod task_definitions;

// Re-export commonly used types
pub use credentials::{CredentialSource, Credentials};
pub use error::{ClientError, Result};

use async_trait::async_trait;
use keel_core::dto::{DescribeServicesResponse, DescribeTaskDefinitionResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::signing::RequestSigner;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("keel/", env!("CARGO_PKG_VERSION"));

const SERVICE: &str = "ecs";
const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";
const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Read operations against the container orchestration control plane
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Describes the named services on `cluster`
    async fn describe_services(
        &self,
        cluster: &str,
        services: &[String],
    ) -> Result<DescribeServicesResponse>;

    /// Fetches a task definition by family, `family:revision`, or ARN
    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<DescribeTaskDefinitionResponse>;
}

/// HTTP client for the ECS API
///
/// Operations are grouped by resource:
/// - Services (describe)
/// - Task definitions (describe)
#[derive(Debug, Clone)]
pub struct EcsClient {
    /// Endpoint requests are POSTed to
    endpoint: Url,
    /// Region used in the signing scope
    region: String,
    /// Credentials used to sign requests
    credentials: Credentials,
    /// HTTP client instance
    client: Client,
}

impl EcsClient {
    /// Create a client for the regional ECS endpoint
    ///
    /// # Arguments
    /// * `region` - Region identifier (e.g., "us-east-1")
    /// * `credentials` - Credentials used to sign every request
    pub fn new(region: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let region = region.into();
        let endpoint = format!("https://ecs.{}.amazonaws.com/", region);
        Self::with_endpoint(region, credentials, &endpoint)
    }

    /// Create a client that talks to a custom endpoint
    ///
    /// Useful for local emulators and VPC endpoints.
    ///
    /// # Example
    /// ```
    /// use keel_client::{Credentials, EcsClient};
    ///
    /// let client = EcsClient::with_endpoint(
    ///     "us-east-1",
    ///     Credentials::new("test", "test"),
    ///     "http://localhost:4566",
    /// )
    /// .unwrap();
    /// assert_eq!(client.endpoint(), "http://localhost:4566/");
    /// ```
    pub fn with_endpoint(
        region: impl Into<String>,
        credentials: Credentials,
        endpoint: &str,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid endpoint {}: {}", endpoint, e))
        })?;
        if endpoint.host_str().is_none() {
            return Err(ClientError::InvalidRequest(format!(
                "endpoint {} has no host",
                endpoint
            )));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            endpoint,
            region: region.into(),
            credentials,
            client,
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Get the signing region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Value of the `Host` header for the endpoint
    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Invoke a JSON protocol operation and deserialize the response
    async fn call<Req, Res>(&self, operation: &str, req: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let payload = serde_json::to_vec(req)
            .map_err(|e| ClientError::InvalidRequest(format!("Failed to encode request: {}", e)))?;
        let target = format!("{}.{}", TARGET_PREFIX, operation);

        let signer = RequestSigner::new(&self.credentials, &self.region, SERVICE);
        let mut signed: Vec<(&str, &str)> = vec![
            ("content-type", JSON_CONTENT_TYPE),
            ("x-amz-target", target.as_str()),
        ];
        if let Some(token) = &self.credentials.session_token {
            signed.push(("x-amz-security-token", token.as_str()));
        }
        let signature = signer.sign(
            "POST",
            &self.host(),
            self.endpoint.path(),
            &signed,
            &payload,
            chrono::Utc::now(),
        );

        debug!("Calling {} at {}", target, self.endpoint);

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header("x-amz-target", &target)
            .header("x-amz-date", &signature.amz_date)
            .header(AUTHORIZATION, &signature.authorization);
        if let Some(token) = &self.credentials.session_token {
            request = request.header("x-amz-security-token", token);
        }

        let response = request.body(payload).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses are turned into [`ClientError::ApiError`] using the
    /// error envelope in the body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
impl ControlPlane for EcsClient {
    async fn describe_services(
        &self,
        cluster: &str,
        services: &[String],
    ) -> Result<DescribeServicesResponse> {
        EcsClient::describe_services(self, cluster, services).await
    }

    async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<DescribeTaskDefinitionResponse> {
        EcsClient::describe_task_definition(self, task_definition).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("AKID", "secret")
    }

    #[test]
    fn test_client_creation() {
        let client = EcsClient::new("us-east-1", credentials()).unwrap();
        assert_eq!(client.endpoint(), "https://ecs.us-east-1.amazonaws.com/");
        assert_eq!(client.region(), "us-east-1");
        assert_eq!(client.host(), "ecs.us-east-1.amazonaws.com");
    }

    #[test]
    fn test_custom_endpoint_keeps_port_in_host() {
        let client =
            EcsClient::with_endpoint("us-east-1", credentials(), "http://localhost:4566").unwrap();
        assert_eq!(client.host(), "localhost:4566");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let err = EcsClient::with_endpoint("us-east-1", credentials(), "not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
