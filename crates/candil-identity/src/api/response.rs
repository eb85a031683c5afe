use candil_auth::{AuthError, Session};
use serde::Deserialize;

/// Success body of the credential endpoints.
///
/// `expiresIn` arrives as a string of seconds because the service
/// serializes 64-bit integers as JSON strings.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionApiResponse {
    /// Provider-assigned identifier of the account.
    pub local_id: String,
    /// The minted ID token.
    pub id_token: String,
    /// Refresh token for renewing the ID token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<String>,
}

impl SessionApiResponse {
    /// Converts the wire response into a [`Session`].
    ///
    /// The relative `expiresIn` becomes an absolute millisecond timestamp,
    /// as it is easier to build logic around a concrete time rather than a
    /// duration. A lifetime the service sent in a shape we cannot parse is
    /// dropped instead of failing the whole login.
    pub(crate) fn into_session(self) -> Session {
        let expires_at = self
            .expires_in
            .and_then(|seconds| seconds.parse::<i64>().ok())
            .map(|seconds| chrono::Utc::now().timestamp_millis() + seconds * 1000);

        Session {
            user_id: self.local_id,
            token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// Error envelope of the credential endpoints.
///
/// The interesting part is `error.message`: a SCREAMING_SNAKE_CASE code,
/// sometimes followed by ` : ` and a human-readable detail.
#[derive(Deserialize, Debug)]
pub(crate) struct IdentityErrorResponse {
    pub error: IdentityErrorBody,
}

#[derive(Deserialize, Debug)]
pub(crate) struct IdentityErrorBody {
    /// HTTP-ish numeric code, unused beyond logging.
    #[serde(default)]
    pub code: i64,
    /// The message code, optionally with a detail suffix.
    pub message: String,
}

impl IdentityErrorResponse {
    /// Maps the service error onto [`AuthError`] by its leading code token.
    /// The full message is preserved in the variant either way.
    pub(crate) fn into_auth_error(self) -> AuthError {
        let message = self.error.message;
        let code = message.split([' ', ':']).next().unwrap_or_default();

        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_EMAIL" | "USER_DISABLED" => AuthError::InvalidCredentials(message),
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::Unavailable(message),
            _ => AuthError::Unexpected(message),
        }
    }
}
