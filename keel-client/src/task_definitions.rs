//! Task-definition-related API operations

use keel_core::dto::{DescribeTaskDefinitionRequest, DescribeTaskDefinitionResponse};

use crate::EcsClient;
use crate::error::Result;

impl EcsClient {
    /// Describe a task definition
    ///
    /// # Arguments
    /// * `task_definition` - Family, `family:revision`, or full ARN
    ///
    /// # Returns
    /// The task definition document, if the API returned one
    pub async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<DescribeTaskDefinitionResponse> {
        let req = DescribeTaskDefinitionRequest {
            task_definition: task_definition.to_string(),
        };

        self.call("DescribeTaskDefinition", &req).await
    }
}
