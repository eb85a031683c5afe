use serde::Serialize;

use crate::state::ProcessState;

/// Snapshot of the sign-up screen's form.
///
/// One value lives in the watch channel owned by [`SignUpFlow`]; the shell
/// renders the latest snapshot and never mutates it directly.
///
/// [`SignUpFlow`]: crate::signup::SignUpFlow
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignUpFormState {
    /// Current value of the email input.
    pub email: String,
    /// Current value of the password input.
    pub password: String,
    /// Current value of the password confirmation input.
    pub confirm_password: String,
    /// Validation message for the email field, if any.
    pub email_error: Option<String>,
    /// Validation message for the password field, if any.
    pub password_error: Option<String>,
    /// Validation message for the confirmation field, if any.
    pub confirm_password_error: Option<String>,
    /// Outcome-level error not attributable to a single field.
    pub form_error: Option<String>,
    /// Whether a submit is in flight.
    pub process_state: ProcessState,
}
