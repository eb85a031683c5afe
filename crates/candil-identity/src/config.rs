use serde::{Deserialize, Serialize};

/// Connection settings for the hosted identity service.
///
/// Defaults to the public endpoint with an empty API key; tests point
/// `base_url` at a local mock server instead.
///
/// ```
/// use candil_identity::IdentityConfig;
///
/// let config = IdentityConfig {
///     api_key: "AIza-example".to_string(),
///     ..IdentityConfig::default()
/// };
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentityConfig {
    /// Base URL of the identity service, without a trailing slash.
    pub base_url: String,
    /// Per-project API key appended as the `key` query parameter on every
    /// request.
    pub api_key: String,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://identitytoolkit.googleapis.com".to_string(),
            api_key: String::new(),
            user_agent: "Candil Rust-SDK".to_string(),
        }
    }
}
