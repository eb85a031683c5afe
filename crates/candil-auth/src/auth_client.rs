use std::sync::Arc;

use crate::{
    login::LoginFlow, options::FlowOptions, provider::IdentityProvider, signup::SignUpFlow,
};

/// Entry point of the crate: produces one flow per screen entry.
///
/// The client owns the shared identity provider handle and the flow
/// options. The flows it hands out are independent of each other and of the
/// client, and are meant to live exactly as long as their screen.
#[derive(Clone)]
pub struct AuthClient {
    provider: Arc<dyn IdentityProvider>,
    options: FlowOptions,
}

impl AuthClient {
    /// Creates a client with the default [`FlowOptions`].
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_options(provider, FlowOptions::default())
    }

    /// Creates a client with explicit options.
    pub fn with_options(provider: Arc<dyn IdentityProvider>, options: FlowOptions) -> Self {
        Self { provider, options }
    }

    /// Flow for one entry into the login screen.
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.provider.clone(), self.options.clone())
    }

    /// Flow for one entry into the sign-up screen.
    pub fn sign_up_flow(&self) -> SignUpFlow {
        SignUpFlow::new(self.provider.clone(), self.options.clone())
    }
}
