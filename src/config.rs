//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `MEDUSA_BACKEND_URL` - Backend base URL (default: http://localhost:9000)
//! - `PUBLISHABLE_KEY` - Publishable API key sent as the store bearer token
//! - `MEDUSA_USERNAME` - Admin email used to log in
//! - `MEDUSA_PASSWORD` - Admin password used to log in
//! - `STORE_CATALOG_PATH` - Store catalog document (default: bundled)
//! - `ADMIN_CATALOG_PATH` - Admin catalog document (default: bundled)
//!
//! Missing values are not errors: empty credentials are sent as-is and the
//! backend decides.

use std::fmt;
use std::path::PathBuf;

use secrecy::SecretString;
use tracing::debug;

use crate::auth::AdminCredentials;
use crate::catalog::{Catalog, CatalogError};
use crate::http::{DEFAULT_BACKEND_URL, HttpError, ReqwestHttpClient};

/// Runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Backend base URL
    pub backend_url: String,
    /// Publishable API key for the store surface
    pub publishable_key: SecretString,
    /// Admin login email
    pub admin_email: String,
    /// Admin login password
    pub admin_password: SecretString,
    /// Store catalog override
    pub store_catalog_path: Option<PathBuf>,
    /// Admin catalog override
    pub admin_catalog_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the process environment, reading `.env`
    /// first when present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).unwrap_or_default();
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        Self {
            backend_url: lookup("MEDUSA_BACKEND_URL")
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            publishable_key: SecretString::from(var("PUBLISHABLE_KEY")),
            admin_email: var("MEDUSA_USERNAME"),
            admin_password: SecretString::from(var("MEDUSA_PASSWORD")),
            store_catalog_path: path("STORE_CATALOG_PATH"),
            admin_catalog_path: path("ADMIN_CATALOG_PATH"),
        }
    }

    pub fn with_backend_url(mut self, backend_url: impl Into<String>) -> Self {
        self.backend_url = backend_url.into();
        self
    }

    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = SecretString::from(key.into());
        self
    }

    pub fn with_admin_credentials(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.admin_email = email.into();
        self.admin_password = SecretString::from(password.into());
        self
    }

    pub fn with_store_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_catalog_path = Some(path.into());
        self
    }

    pub fn with_admin_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.admin_catalog_path = Some(path.into());
        self
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            email: self.admin_email.clone(),
            password: self.admin_password.clone(),
        }
    }

    /// Loads the store catalog from the configured path, or the bundled one.
    pub fn load_store_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.store_catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::bundled_store(),
        }
    }

    /// Loads the admin catalog from the configured path, or the bundled one.
    pub fn load_admin_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.admin_catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::bundled_admin(),
        }
    }

    /// Builds a `reqwest`-backed client for the configured backend.
    pub fn http_client(&self) -> Result<ReqwestHttpClient, HttpError> {
        ReqwestHttpClient::builder()
            .with_base_url(&self.backend_url)
            .build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("backend_url", &self.backend_url)
            .field("publishable_key", &"[REDACTED]")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("store_catalog_path", &self.store_catalog_path)
            .field("admin_catalog_path", &self.admin_catalog_path)
            .finish()
    }
}
