//! Configuration module
//!
//! Render inputs supplied by the caller, and the values captured once from
//! the host automation environment.

use std::path::PathBuf;

/// Revision used when the host does not provide one
pub const UNKNOWN_REVISION: &str = "unknown";

/// Inputs of a render run
#[derive(Debug, Clone)]
pub struct Config {
    /// Region of the cluster
    pub region: String,

    /// Cluster the service runs on
    pub cluster: String,

    /// Service whose task definition is rendered
    pub service: String,

    /// New image reference for the selected container
    pub image: String,

    /// Deployment environment label (first half of `DOCKER_BUILD`)
    pub app_env: String,

    /// Build number (second half of `DOCKER_BUILD`)
    pub build_number: String,

    /// Overrides the regional API endpoint
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Validates the configuration
    ///
    /// Every input except the endpoint is required and must be non-empty.
    pub fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("aws-region", &self.region),
            ("aws-cluster-name", &self.cluster),
            ("aws-service-name", &self.service),
            ("docker-image", &self.image),
            ("app-env", &self.app_env),
            ("docker-build-number", &self.build_number),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("Input required and not supplied: {}", name);
            }
        }

        if let Some(url) = &self.endpoint_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("endpoint_url must start with http:// or https://");
            }
        }

        Ok(())
    }
}

/// Values read from the host automation environment
///
/// Captured once at startup so nothing below `main` reads process state.
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    /// Source revision being deployed (`GITHUB_SHA`)
    pub revision: Option<String>,

    /// Candidate output directories, most preferred first
    pub work_dir_candidates: Vec<Option<String>>,

    /// File that step outputs are appended to (`GITHUB_OUTPUT`)
    pub output_file: Option<PathBuf>,
}

impl HostEnvironment {
    /// Captures the host environment from process environment variables
    ///
    /// - GITHUB_SHA: revision identifier
    /// - RUNNER_TEMP, GITHUB_WORKSPACE, PWD: output directory candidates
    /// - GITHUB_OUTPUT: step output file
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok();

        Self {
            revision: var("GITHUB_SHA"),
            work_dir_candidates: vec![var("RUNNER_TEMP"), var("GITHUB_WORKSPACE"), var("PWD")],
            output_file: var("GITHUB_OUTPUT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Revision identifier, `"unknown"` when absent or empty
    pub fn revision(&self) -> &str {
        self.revision
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REVISION)
    }

    /// First non-empty candidate directory, or the current directory
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir_candidates
            .iter()
            .flatten()
            .find(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            region: "us-east-1".to_string(),
            cluster: "c1".to_string(),
            service: "svc1".to_string(),
            image: "myrepo/app:42".to_string(),
            app_env: "prod".to_string(),
            build_number: "99".to_string(),
            endpoint_url: None,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Empty required input should fail
        config.cluster = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input required and not supplied: aws-cluster-name"
        );

        config.cluster = "c1".to_string();

        // Invalid endpoint should fail
        config.endpoint_url = Some("localhost:4566".to_string());
        assert!(config.validate().is_err());

        config.endpoint_url = Some("http://localhost:4566".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_revision_defaults_to_unknown() {
        let mut host = HostEnvironment::default();
        assert_eq!(host.revision(), "unknown");

        host.revision = Some(String::new());
        assert_eq!(host.revision(), "unknown");

        host.revision = Some("deadbeef".to_string());
        assert_eq!(host.revision(), "deadbeef");
    }

    #[test]
    fn test_work_dir_skips_missing_and_empty_candidates() {
        let host = HostEnvironment {
            work_dir_candidates: vec![None, Some(String::new()), Some("/workspace".to_string())],
            ..Default::default()
        };
        assert_eq!(host.work_dir(), PathBuf::from("/workspace"));

        let host = HostEnvironment {
            work_dir_candidates: vec![Some("/tmp/runner".to_string()), Some("/pwd".to_string())],
            ..Default::default()
        };
        assert_eq!(host.work_dir(), PathBuf::from("/tmp/runner"));
    }

    #[test]
    fn test_work_dir_falls_back_to_current_directory() {
        let host = HostEnvironment {
            work_dir_candidates: vec![None, None],
            ..Default::default()
        };
        assert_eq!(host.work_dir(), PathBuf::new());
        assert_eq!(
            host.work_dir().join("task-definition-x.json"),
            PathBuf::from("task-definition-x.json")
        );
    }
}
