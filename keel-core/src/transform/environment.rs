//! Environment variable merging

use std::fmt;

use crate::domain::task_definition::KeyValuePair;

/// Source revision the image was built from
pub const GIT_REVISION: &str = "GIT_REVISION";

/// Build label of the image, `{appEnv}-{buildNumber}`
pub const DOCKER_BUILD: &str = "DOCKER_BUILD";

/// Label identifying a build, composed of the deployment environment and the
/// build number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLabel(String);

impl BuildLabel {
    pub fn new(app_env: &str, build_number: &str) -> Self {
        Self(format!("{}-{}", app_env, build_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `existing` with any `GIT_REVISION`/`DOCKER_BUILD` entries replaced
///
/// Other entries keep their relative order; the two managed entries are
/// appended last. A missing list is treated as empty.
pub fn merge_environment(
    existing: Option<Vec<KeyValuePair>>,
    revision: &str,
    build_label: &str,
) -> Vec<KeyValuePair> {
    let mut environment: Vec<KeyValuePair> = existing
        .unwrap_or_default()
        .into_iter()
        .filter(|var| !matches!(var.name.as_deref(), Some(GIT_REVISION | DOCKER_BUILD)))
        .collect();

    environment.push(KeyValuePair::new(GIT_REVISION, revision));
    environment.push(KeyValuePair::new(DOCKER_BUILD, build_label));
    environment
}
