#![doc = include_str!("../README.md")]

mod api;
mod provider;

pub use api::start_identity_mock;
pub use provider::MockIdentityProvider;
