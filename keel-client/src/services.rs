//! Service-related API operations

use keel_core::dto::{DescribeServicesRequest, DescribeServicesResponse};

use crate::EcsClient;
use crate::error::Result;

impl EcsClient {
    /// Describe services on a cluster
    ///
    /// # Arguments
    /// * `cluster` - Cluster name or ARN
    /// * `services` - Service names or ARNs to describe
    ///
    /// # Returns
    /// The matching services plus per-service failures
    ///
    /// # Example
    /// ```no_run
    /// # use keel_client::{Credentials, EcsClient};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = EcsClient::new("us-east-1", Credentials::new("AKID", "secret"))?;
    /// let res = client
    ///     .describe_services("my-cluster", &["my-service".to_string()])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn describe_services(
        &self,
        cluster: &str,
        services: &[String],
    ) -> Result<DescribeServicesResponse> {
        let req = DescribeServicesRequest {
            cluster: cluster.to_string(),
            services: services.to_vec(),
        };

        self.call("DescribeServices", &req).await
    }
}
