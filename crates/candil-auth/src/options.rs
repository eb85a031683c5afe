use std::time::Duration;

/// How a submit with a blank email but a filled-in password is handled.
///
/// The shipped mobile screens fell through this case without reporting
/// anything: the submit ended with no field error and no provider call.
/// [`Reject`](BlankEmailPolicy::Reject) reports the blank email like every
/// other validation failure; [`SilentAbort`](BlankEmailPolicy::SilentAbort)
/// keeps the historical behavior for shells that still render it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BlankEmailPolicy {
    /// Record a field error on the email input and end the submit.
    #[default]
    Reject,
    /// End the submit with no error and no provider call.
    SilentAbort,
}

/// Behavior settings for the flows produced by an [`AuthClient`].
///
/// [`AuthClient`]: crate::AuthClient
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowOptions {
    /// Pause between submit start and validation.
    ///
    /// Keeps the loading state visible for a moment instead of flickering
    /// on fast networks. The pause runs on every submit, even ones that
    /// validation will reject.
    pub submit_delay: Duration,
    /// Handling of the blank-email validation case.
    pub blank_email: BlankEmailPolicy,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(2000),
            blank_email: BlankEmailPolicy::default(),
        }
    }
}
