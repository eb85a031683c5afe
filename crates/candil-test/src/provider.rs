use async_trait::async_trait;
use candil_auth::{AuthError, IdentityProvider, Session};
use tokio::sync::Mutex;

struct MockState {
    outcome: Result<Session, AuthError>,
    authenticate_calls: usize,
    register_calls: usize,
    last_credentials: Option<(String, String)>,
}

/// Scripted [`IdentityProvider`] double.
///
/// Returns a fixed outcome on every call and records how it was invoked, so
/// tests can assert both "the provider was never reached" and "the provider
/// received exactly the submitted snapshot".
pub struct MockIdentityProvider {
    state: Mutex<MockState>,
}

impl MockIdentityProvider {
    /// A provider that accepts every call with [`Self::test_session`].
    pub fn succeeding() -> Self {
        Self::with_outcome(Ok(Self::test_session()))
    }

    /// A provider that fails every call with the given error.
    pub fn failing(error: AuthError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// A provider that answers every call with the given outcome.
    pub fn with_outcome(outcome: Result<Session, AuthError>) -> Self {
        Self {
            state: Mutex::new(MockState {
                outcome,
                authenticate_calls: 0,
                register_calls: 0,
                last_credentials: None,
            }),
        }
    }

    /// Replaces the outcome for all future calls. Calls already made keep
    /// their recorded counts and credentials.
    pub async fn set_outcome(&self, outcome: Result<Session, AuthError>) {
        self.state.lock().await.outcome = outcome;
    }

    /// The canned session returned by [`Self::succeeding`].
    pub fn test_session() -> Session {
        Session {
            user_id: "test-user-id".to_string(),
            token: "test-token".to_string(),
            refresh_token: Some("test-refresh-token".to_string()),
            expires_at: Some(4_102_444_800_000),
        }
    }

    /// Number of `authenticate` calls received so far.
    pub async fn authenticate_calls(&self) -> usize {
        self.state.lock().await.authenticate_calls
    }

    /// Number of `register` calls received so far.
    pub async fn register_calls(&self) -> usize {
        self.state.lock().await.register_calls
    }

    /// Calls received so far across both operations.
    pub async fn total_calls(&self) -> usize {
        let state = self.state.lock().await;
        state.authenticate_calls + state.register_calls
    }

    /// The email and password of the most recent call, if any.
    pub async fn last_credentials(&self) -> Option<(String, String)> {
        self.state.lock().await.last_credentials.clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut state = self.state.lock().await;
        state.authenticate_calls += 1;
        state.last_credentials = Some((email.to_string(), password.to_string()));
        state.outcome.clone()
    }

    async fn register(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut state = self.state.lock().await;
        state.register_calls += 1;
        state.last_credentials = Some((email.to_string(), password.to_string()));
        state.outcome.clone()
    }
}
