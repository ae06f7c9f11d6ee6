//! Admin authentication.
//!
//! [`AdminSession`] is a typestate: an `AdminSession<Unauthenticated>` only
//! holds credentials, and [`AdminSession::login`] turns it into an
//! `AdminSession<Authenticated>` carrying the bearer token. The admin surface
//! can only be built from the latter.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};

use crate::catalog::HttpMethod;
use crate::http::{HttpClient, HttpError, HttpRequest};

/// Route used to exchange admin credentials for a token.
pub const ADMIN_LOGIN_PATH: &str = "/auth/user/emailpass";

/// Errors from the admin login step.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend refused the credentials
    #[error("Login rejected with status {status}: {body}")]
    LoginRejected { status: u16, body: serde_json::Value },
    /// The login response did not contain a token
    #[error("Login response did not include a token")]
    MissingToken,
    /// The login request itself failed
    #[error("Login request failed: {0}")]
    Http(#[from] HttpError),
}

/// Admin email/password credentials.
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: SecretString,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Session state before login.
#[derive(Debug, Clone)]
pub struct Unauthenticated {
    credentials: AdminCredentials,
}

/// Session state after a successful login.
#[derive(Debug, Clone)]
pub struct Authenticated {
    token: SecretString,
}

/// An admin session in state `S`.
#[derive(Debug, Clone)]
pub struct AdminSession<S> {
    state: S,
}

impl AdminSession<Unauthenticated> {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            state: Unauthenticated { credentials },
        }
    }

    pub fn credentials(&self) -> &AdminCredentials {
        &self.state.credentials
    }

    /// Exchanges the credentials for a bearer token.
    pub async fn login(
        self,
        client: &dyn HttpClient,
    ) -> Result<AdminSession<Authenticated>, AuthError> {
        let credentials = self.state.credentials;
        debug!(email = %credentials.email, "Logging in to admin API");

        let request = HttpRequest {
            method: HttpMethod::Post,
            path: ADMIN_LOGIN_PATH.to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            query: Vec::new(),
            body: Some(json!({
                "email": credentials.email,
                "password": credentials.password.expose_secret(),
            })),
        };

        let response = client.fetch(request).await?;
        if !response.is_success() {
            return Err(AuthError::LoginRejected {
                status: response.status,
                body: response.body,
            });
        }

        let token = response
            .body
            .get("token")
            .and_then(|token| token.as_str())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        info!("Admin session authenticated");

        Ok(AdminSession::authenticated(token))
    }
}

impl AdminSession<Authenticated> {
    /// Wraps a token obtained elsewhere.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            state: Authenticated {
                token: SecretString::from(token.into()),
            },
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.state.token
    }
}
