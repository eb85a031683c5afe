use serde::Serialize;

/// Credentials payload shared by the sign-in and sign-up endpoints.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialsRequestPayload<'a> {
    /// Account email address.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
    /// Always true: the service must mint an ID and refresh token pair
    /// instead of a bare account record.
    pub return_secure_token: bool,
}
