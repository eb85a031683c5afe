//! Local validation shared by the auth forms.
//!
//! The screens only check for blank fields and, on sign-up, that the
//! confirmation matches the password. Anything stronger (email shape,
//! password strength, credential validity) is the identity service's call
//! and surfaces as a provider error instead.

/// Field error shown on a blank email input.
pub const EMPTY_EMAIL: &str = "Correo vacio!";

/// Field error shown on a blank password input.
pub const EMPTY_PASSWORD: &str = "Contraseña vacia!";

/// Field error shown on a blank confirmation input.
pub const EMPTY_CONFIRMATION: &str = "Confirmacion de contraseña vacia!";

/// Field error shown on the confirmation input when the whole sign-up form
/// is blank.
pub const EMPTY_CONFIRMATION_BLANK_FORM: &str = "confirmacion vacia!";

/// Field error shown on the confirmation input when it does not match the
/// password.
pub const PASSWORD_MISMATCH: &str = "La contraseña no coincide!";

/// Returns true when the value contains no non-whitespace character.
///
/// A string of spaces is as blank as `""`, matching how the mobile screens
/// treat their inputs.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
