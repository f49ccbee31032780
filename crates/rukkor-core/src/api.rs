//! Backend auth API client.
//!
//! Thin request/response wrapper over the Rukkor auth endpoints. Every call
//! reads the session store immediately before sending (never cached) and
//! attaches the token as a bearer header when one exists.
//!
//! Failures collapse to a single human-readable message, extracted in
//! priority order from the server `message` field, the server `error` field,
//! the transport error text, and finally an operation-specific fallback.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::User;
use crate::session::SessionStore;

/// Fields collected by the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFields {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub tos_accept: bool,
    pub privacy_policy_accept: bool,
}

#[derive(Debug, Serialize)]
struct RegisterBody {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    tos_accept: bool,
    privacy_policy_accept: bool,
}

impl From<&RegisterFields> for RegisterBody {
    fn from(fields: &RegisterFields) -> Self {
        Self {
            username: fields.username.trim().to_string(),
            first_name: fields.first_name.trim().to_string(),
            last_name: fields.last_name.trim().to_string(),
            email: fields.email.trim().to_lowercase(),
            password: fields.password.clone(),
            tos_accept: fields.tos_accept,
            privacy_policy_accept: fields.privacy_policy_accept,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyOtpBody<'a> {
    otp: &'a str,
    email: &'a str,
}

/// Response envelope shared by all auth endpoints.
///
/// A body without an explicit `success: true` counts as a failure even when
/// the transport status is 2xx.
#[derive(Debug, Default, Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    success: bool,
    user: Option<User>,
    token: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Client for the remote auth service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
}

impl AuthClient {
    /// Creates a client for the auth endpoints mounted at `base_url`.
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Returns the session store this client reads tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Registers a new account.
    ///
    /// String fields are trimmed and the email lowercased before sending.
    /// A success response without a user payload is treated as a failure.
    pub async fn register(&self, fields: &RegisterFields) -> Result<User> {
        let body = RegisterBody::from(fields);
        let envelope = self.post("register", &body, "Registration failed").await?;
        envelope
            .user
            .ok_or_else(|| anyhow!("Registration completed but no user data returned"))
    }

    /// Authenticates with email and password, yielding the account and a
    /// bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let envelope = self
            .post("login", &LoginBody { email, password }, "Login failed")
            .await?;
        match (envelope.user, envelope.token) {
            (Some(user), Some(token)) => Ok((user, token)),
            _ => Err(anyhow!("Login failed")),
        }
    }

    /// Verifies a one-time password, yielding a bearer token.
    pub async fn verify_otp(&self, otp: &str, email: &str) -> Result<String> {
        let envelope = self
            .post(
                "verify-otp",
                &VerifyOtpBody { otp, email },
                "OTP verification failed",
            )
            .await?;
        envelope
            .token
            .ok_or_else(|| anyhow!("OTP verification failed"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Sends one auth request and decodes the shared envelope.
    ///
    /// `fallback` is the operation-specific message used when neither the
    /// server nor the transport produced one.
    async fn post<B: Serialize>(&self, path: &str, body: &B, fallback: &str) -> Result<AuthEnvelope> {
        let url = self.endpoint(path);

        let mut request = self.http.post(&url).json(body);
        // Token is read fresh from disk for every request, never cached.
        if let Some(token) = self.session.load_token()? {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(endpoint = %url, error = %e, "auth request failed to send");
                return Err(anyhow!("{e}"));
            }
        };

        let status = response.status();
        // Error details ride in the body, so decode the envelope regardless
        // of status. An unparseable body falls back to the transport text.
        let envelope: AuthEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if status.is_success() => return Err(anyhow!("{fallback}")),
            Err(_) => return Err(anyhow!("Request failed (HTTP {status})")),
        };

        if !status.is_success() || !envelope.success {
            let message = envelope.message.or(envelope.error).unwrap_or_else(|| {
                if status.is_success() {
                    fallback.to_string()
                } else {
                    format!("Request failed (HTTP {status})")
                }
            });
            debug!(endpoint = %url, %status, "auth request rejected");
            return Err(anyhow!(message));
        }

        debug!(endpoint = %url, "auth request succeeded");
        Ok(envelope)
    }
}
