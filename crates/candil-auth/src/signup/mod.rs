//! Sign-up screen flow.

mod flow;
mod state;

pub use flow::SignUpFlow;
pub use state::SignUpFormState;
