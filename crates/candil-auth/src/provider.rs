use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Proof of a successful authentication or registration.
///
/// The flows treat a session as opaque: they only care that the provider
/// returned one. The fields exist for the shell and for provider
/// implementations.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Provider-assigned identifier of the authenticated user.
    pub user_id: String,
    /// Token proving the authentication.
    pub token: String,
    /// Refresh token, when the provider issues one.
    pub refresh_token: Option<String>,
    /// Timestamp in milliseconds-precision when the token expires, if known.
    pub expires_at: Option<i64>,
}

/// Failure reported by an identity provider operation.
///
/// The display form is the provider's raw message: [`SignUpFlow`] forwards
/// it verbatim as its form error, while [`LoginFlow`] only looks at the fact
/// that the call failed.
///
/// [`LoginFlow`]: crate::login::LoginFlow
/// [`SignUpFlow`]: crate::signup::SignUpFlow
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the credentials: unknown account, wrong
    /// password or a malformed email.
    #[error("{0}")]
    InvalidCredentials(String),
    /// The provider could not be reached or asked the client to back off.
    #[error("{0}")]
    Unavailable(String),
    /// Anything else the provider reported.
    #[error("{0}")]
    Unexpected(String),
}

impl AuthError {
    /// The provider's raw message.
    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials(message)
            | AuthError::Unavailable(message)
            | AuthError::Unexpected(message) => message,
        }
    }
}

/// External identity service consumed by the flows.
///
/// A single instance is shared by every flow an [`AuthClient`] produces, so
/// implementations must be safe to call concurrently.
///
/// [`AuthClient`]: crate::AuthClient
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies the credentials and returns a session for the account.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Creates an account for the credentials and returns a session for it.
    async fn register(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_message() {
        let error = AuthError::Unavailable("network down".to_string());
        assert_eq!(error.to_string(), "network down");
        assert_eq!(error.message(), "network down");
    }

    #[test]
    fn session_serializes_as_camel_case() {
        let session = Session {
            user_id: "uid-1".to_string(),
            token: "token-1".to_string(),
            refresh_token: None,
            expires_at: Some(1_700_000_000_000),
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["userId"], "uid-1");
        assert_eq!(value["refreshToken"], serde_json::Value::Null);
        assert_eq!(value["expiresAt"], 1_700_000_000_000i64);
    }
}
