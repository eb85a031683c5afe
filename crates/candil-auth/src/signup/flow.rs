use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    options::{BlankEmailPolicy, FlowOptions},
    provider::IdentityProvider,
    signup::SignUpFormState,
    state::ProcessState,
    validation,
};

/// Form state machine behind the sign-up screen.
///
/// Mirrors [`LoginFlow`] with a third field for the password confirmation.
/// Unlike login, a provider failure here is forwarded verbatim as the form
/// error so the user can see why the account was not created.
///
/// [`LoginFlow`]: crate::login::LoginFlow
pub struct SignUpFlow {
    provider: Arc<dyn IdentityProvider>,
    options: FlowOptions,
    state: watch::Sender<SignUpFormState>,
}

impl SignUpFlow {
    /// Creates an idle flow with an empty form.
    pub fn new(provider: Arc<dyn IdentityProvider>, options: FlowOptions) -> Self {
        Self {
            provider,
            options,
            state: watch::Sender::new(SignUpFormState::default()),
        }
    }

    /// Subscribes to the form state.
    ///
    /// The receiver holds the current value immediately and is notified on
    /// every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<SignUpFormState> {
        self.state.subscribe()
    }

    /// Returns a point-in-time snapshot of the form state.
    pub fn form_state(&self) -> SignUpFormState {
        self.state.borrow().clone()
    }

    /// Replaces the email value. Ignored while a submit is in flight.
    pub fn set_email(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if state.process_state.is_loading() {
                return false;
            }
            state.email = value;
            true
        });
    }

    /// Replaces the password value. Ignored while a submit is in flight.
    pub fn set_password(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if state.process_state.is_loading() {
                return false;
            }
            state.password = value;
            true
        });
    }

    /// Replaces the confirmation value. Ignored while a submit is in flight.
    pub fn set_confirm_password(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if state.process_state.is_loading() {
                return false;
            }
            state.confirm_password = value;
            true
        });
    }

    /// Runs one submit attempt against the fields as they are right now.
    ///
    /// The attempt waits the configured delay, validates the snapshot taken
    /// at submit start and, if the fields pass, asks the provider to
    /// register the account with the email and password. The confirmation
    /// only gates validation and is never sent anywhere. `on_success` is
    /// invoked exactly once when the account is created; a provider failure
    /// becomes the form error with the provider's message untouched.
    ///
    /// A submit started while another is in flight returns immediately
    /// without touching the state. Dropping the returned future abandons
    /// the attempt, suppresses the callback and still resets the process
    /// state to idle.
    pub async fn submit(&self, on_success: impl FnOnce()) {
        let mut email = String::new();
        let mut password = String::new();
        let mut confirm_password = String::new();
        let started = self.state.send_if_modified(|state| {
            if state.process_state.is_loading() {
                return false;
            }
            state.process_state = ProcessState::Loading;
            state.form_error = None;
            email = state.email.clone();
            password = state.password.clone();
            confirm_password = state.confirm_password.clone();
            true
        });
        if !started {
            log::debug!("Sign-up submit ignored, another one is in flight");
            return;
        }
        log::debug!("Sign-up submit started");

        let _idle = IdleOnDrop(&self.state);

        tokio::time::sleep(self.options.submit_delay).await;

        if !self.validate(&email, &password, &confirm_password) {
            log::debug!("Sign-up submit rejected by validation");
            return;
        }

        match self.provider.register(&email, &password).await {
            Ok(_session) => {
                log::debug!("Sign-up submit succeeded");
                on_success();
            }
            Err(error) => {
                log::warn!("Sign-up submit failed: {error:?}");
                self.state
                    .send_modify(|state| state.form_error = Some(error.to_string()));
            }
        }
    }

    /// Applies the local checks to the submitted snapshot, replacing any
    /// field errors left over from a previous attempt. Returns false when
    /// the submit must end without a provider call.
    ///
    /// The confirmation is compared to the password untrimmed, so trailing
    /// whitespace counts as a mismatch.
    fn validate(&self, email: &str, password: &str, confirm_password: &str) -> bool {
        let email_blank = validation::is_blank(email);
        let password_blank = validation::is_blank(password);
        let confirm_blank = validation::is_blank(confirm_password);
        let blank_email_policy = self.options.blank_email;

        let mut valid = true;
        self.state.send_modify(|state| {
            state.email_error = None;
            state.password_error = None;
            state.confirm_password_error = None;

            if email_blank && password_blank && confirm_blank {
                state.email_error = Some(validation::EMPTY_EMAIL.to_string());
                state.password_error = Some(validation::EMPTY_PASSWORD.to_string());
                state.confirm_password_error =
                    Some(validation::EMPTY_CONFIRMATION_BLANK_FORM.to_string());
                valid = false;
            } else if email_blank {
                if blank_email_policy == BlankEmailPolicy::Reject {
                    state.email_error = Some(validation::EMPTY_EMAIL.to_string());
                }
                valid = false;
            } else if password_blank {
                state.password_error = Some(validation::EMPTY_PASSWORD.to_string());
                valid = false;
            } else if confirm_blank {
                state.confirm_password_error = Some(validation::EMPTY_CONFIRMATION.to_string());
                valid = false;
            } else if password != confirm_password {
                state.confirm_password_error = Some(validation::PASSWORD_MISMATCH.to_string());
                valid = false;
            }
        });
        valid
    }
}

/// Resets the process state when a submit ends, on every path including
/// cancellation of the submit future.
struct IdleOnDrop<'a>(&'a watch::Sender<SignUpFormState>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0
            .send_modify(|state| state.process_state = ProcessState::Idle);
    }
}
