use async_trait::async_trait;
use candil_auth::{AuthError, IdentityProvider, Session};
use reqwest::header::{self, HeaderValue};

use crate::{
    api::{CredentialsRequestPayload, IdentityErrorResponse, SessionApiResponse},
    config::IdentityConfig,
};

/// REST client for the hosted identity service.
///
/// Wraps the two credential endpoints the app's screens need and implements
/// [`IdentityProvider`] so the auth flows can consume it directly.
#[derive(Clone, Debug)]
pub struct IdentityApiClient {
    config: IdentityConfig,
    http_client: reqwest::Client,
}

impl IdentityApiClient {
    /// Builds a client for the configured service.
    pub fn new(config: IdentityConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.append(
            header::USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .expect("User agent should be a valid header value"),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("HTTP Client build should not fail");

        Self {
            config,
            http_client,
        }
    }

    /// Exchanges email and password credentials for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.send_credentials("accounts:signInWithPassword", email, password)
            .await
    }

    /// Creates an account for the credentials and returns its session.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.send_credentials("accounts:signUp", email, password)
            .await
    }

    /// Common POST shared by both credential endpoints: same payload, same
    /// success body, same error envelope.
    async fn send_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let url = format!("{}/v1/{}", self.config.base_url, endpoint);
        let payload = CredentialsRequestPayload {
            email,
            password,
            return_secure_token: true,
        };

        log::debug!("Sending credentials to {endpoint}");

        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .header(header::ACCEPT, "application/json")
            // The response carries tokens, neither it nor the request may be
            // cached anywhere along the way.
            .header(header::CACHE_CONTROL, "no-store")
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            let success: SessionApiResponse = response.json().await.map_err(transport_error)?;
            return Ok(success.into_session());
        }

        let error: IdentityErrorResponse = response.json().await.map_err(transport_error)?;
        log::warn!(
            "Identity service rejected {endpoint}: code {}",
            error.error.code
        );
        Err(error.into_auth_error())
    }
}

/// Folds transport failures into the provider error taxonomy: anything that
/// kept the request from reaching the service is `Unavailable`, a reply we
/// could not interpret is `Unexpected`.
fn transport_error(error: reqwest::Error) -> AuthError {
    if error.is_connect() || error.is_timeout() {
        AuthError::Unavailable(error.to_string())
    } else {
        AuthError::Unexpected(error.to_string())
    }
}

#[async_trait]
impl IdentityProvider for IdentityApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.sign_in_with_password(email, password).await
    }

    async fn register(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.sign_up(email, password).await
    }
}
