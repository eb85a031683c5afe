//! Login screen flow.

mod flow;
mod state;

pub use flow::{LoginFlow, LOGIN_FAILED};
pub use state::LoginFormState;
