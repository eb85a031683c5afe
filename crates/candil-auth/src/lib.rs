#![doc = include_str!("../README.md")]

mod auth_client;
pub mod login;
mod options;
mod provider;
pub mod signup;
mod state;
pub mod validation;

pub use auth_client::AuthClient;
pub use options::{BlankEmailPolicy, FlowOptions};
pub use provider::{AuthError, IdentityProvider, Session};
pub use state::ProcessState;
