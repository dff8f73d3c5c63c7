//! Configuration management for the matter.online extractor.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files: the account used to log in and the base URLs of
//! the API and of the web application.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line credentials (highest priority, handled by the CLI)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Built-in defaults for the base URLs

use std::{env, io::ErrorKind, path::PathBuf};

use crate::{MatterError, Res};

/// Credential store key of the platform.
pub const NETRC_MACHINE: &str = "matter.online";

pub const DEFAULT_API_BASE: &str = "https://api.matter.online/api/v1/";
pub const DEFAULT_APP_BASE: &str = "https://app.matter.online/";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/matterdl/.env`
/// - macOS: `~/Library/Application Support/matterdl/.env`
/// - Windows: `%LOCALAPPDATA%/matterdl/.env`
///
/// A missing file is not an error; variables may also come from the process
/// environment.
///
/// # Errors
///
/// Returns [`MatterError::Config`] if the directory cannot be created or the
/// file exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| MatterError::Config(e.to_string()))?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MatterError::Config(format!(
            "cannot load {}: {}",
            path.display(),
            e
        ))),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("matterdl/.env");
    path
}

/// Account used for the login exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Source of the account for a given machine name.
pub trait CredentialStore {
    fn credentials(&self, machine: &str) -> Option<Credentials>;
}

/// Reads `MATTER_EMAIL` and `MATTER_PASSWORD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialStore for EnvCredentials {
    fn credentials(&self, _machine: &str) -> Option<Credentials> {
        let email = env::var("MATTER_EMAIL").ok().filter(|e| !e.is_empty())?;
        let password = env::var("MATTER_PASSWORD").ok()?;
        Some(Credentials { email, password })
    }
}

/// Credentials given explicitly, e.g. on the command line.
impl CredentialStore for Option<Credentials> {
    fn credentials(&self, _machine: &str) -> Option<Credentials> {
        self.clone()
    }
}

/// Base URLs of the API and of the web application, both ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub app_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_base: DEFAULT_APP_BASE.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(api_base: impl Into<String>, app_base: impl Into<String>) -> Self {
        Self {
            api_base: with_trailing_slash(api_base.into()),
            app_base: with_trailing_slash(app_base.into()),
        }
    }

    /// Uses `MATTER_API_BASE` and `MATTER_APP_BASE` when set.
    pub fn from_env() -> Self {
        Self::new(api_base(), app_base())
    }
}

/// Returns the API base URL.
///
/// Retrieves the `MATTER_API_BASE` environment variable, falling back to
/// `https://api.matter.online/api/v1/`.
pub fn api_base() -> String {
    env::var("MATTER_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

/// Returns the web application base URL used for uploader and playlist links.
pub fn app_base() -> String {
    env::var("MATTER_APP_BASE").unwrap_or_else(|_| DEFAULT_APP_BASE.to_string())
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
