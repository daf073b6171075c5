//! Credential resolution
//!
//! Two acquisition strategies are supported: ambient environment variables
//! (with a fallback to the shared credentials file) and an explicitly named
//! profile from the shared credentials file.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ClientError, Result};

const DEFAULT_PROFILE: &str = "default";

/// Static credentials used to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attaches a session token for temporary credentials
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Where credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, falling back to the
    /// profile named by `AWS_PROFILE` (or `default`)
    Environment,
    /// A named profile in the shared credentials file
    Profile(String),
}

impl CredentialSource {
    /// Resolves credentials from the process environment
    pub fn resolve(&self) -> Result<Credentials> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves credentials, reading environment variables through `env`
    pub fn resolve_with<F>(&self, env: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.is_empty());

        match self {
            CredentialSource::Environment => {
                if let (Some(key_id), Some(secret)) = (
                    lookup("AWS_ACCESS_KEY_ID"),
                    lookup("AWS_SECRET_ACCESS_KEY"),
                ) {
                    debug!("Using credentials from environment");
                    let credentials = Credentials::new(key_id, secret);
                    return Ok(match lookup("AWS_SESSION_TOKEN") {
                        Some(token) => credentials.with_session_token(token),
                        None => credentials,
                    });
                }

                let profile = lookup("AWS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());
                load_profile(&profile, &lookup)
            }
            CredentialSource::Profile(name) => load_profile(name, &lookup),
        }
    }
}

fn load_profile<F>(name: &str, lookup: &F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let path = shared_credentials_path(lookup).ok_or_else(|| {
        ClientError::Credentials("cannot locate the shared credentials file".to_string())
    })?;

    debug!("Loading profile {} from {}", name, path.display());

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        ClientError::Credentials(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse_profile(&contents, name).ok_or_else(|| {
        ClientError::Credentials(format!(
            "profile {} not found or incomplete in {}",
            name,
            path.display()
        ))
    })
}

fn shared_credentials_path<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("AWS_SHARED_CREDENTIALS_FILE")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".aws").join("credentials")))
}

/// Extracts one profile from the contents of a shared credentials file
///
/// Returns `None` if the profile is missing or lacks a key id or secret.
pub fn parse_profile(contents: &str, profile: &str) -> Option<Credentials> {
    let mut in_profile = false;
    let mut key_id = None;
    let mut secret = None;
    let mut token = None;

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let section = section.trim();
            let section = section.strip_prefix("profile ").unwrap_or(section).trim();
            in_profile = section == profile;
            continue;
        }

        if !in_profile {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().to_string();
            match key.trim() {
                "aws_access_key_id" => key_id = Some(value),
                "aws_secret_access_key" => secret = Some(value),
                "aws_session_token" => token = Some(value),
                _ => {}
            }
        }
    }

    let credentials = Credentials::new(key_id?, secret?);
    Some(match token {
        Some(token) => credentials.with_session_token(token),
        None => credentials,
    })
}
