use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    login::LoginFormState,
    options::{BlankEmailPolicy, FlowOptions},
    provider::IdentityProvider,
    state::ProcessState,
    validation,
};

/// Form error shown for any provider failure during login.
///
/// The login screen does not tell an unknown account, a wrong password and
/// an unreachable service apart, so the provider's error is collapsed into
/// this one message.
pub const LOGIN_FAILED: &str = "Credenciales incorrectas";

/// Form state machine behind the login screen.
///
/// The flow owns the screen state and publishes every change through a
/// watch channel. Field setters apply instantly while the flow is idle and
/// are ignored during a submit; [`submit`](LoginFlow::submit) runs the whole
/// attempt against the snapshot taken when it started.
pub struct LoginFlow {
    provider: Arc<dyn IdentityProvider>,
    options: FlowOptions,
    state: watch::Sender<LoginFormState>,
}

impl LoginFlow {
    /// Creates an idle flow with an empty form.
    pub fn new(provider: Arc<dyn IdentityProvider>, options: FlowOptions) -> Self {
        Self {
            provider,
            options,
            state: watch::Sender::new(LoginFormState::default()),
        }
    }

    /// Subscribes to the form state.
    ///
    /// The receiver holds the current value immediately and is notified on
    /// every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<LoginFormState> {
        self.state.subscribe()
    }

    /// Returns a point-in-time snapshot of the form state.
    pub fn form_state(&self) -> LoginFormState {
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

    /// Runs one submit attempt against the fields as they are right now.
    ///
    /// The attempt waits the configured delay, validates the snapshot taken
    /// at submit start and, if the fields pass, asks the provider to
    /// authenticate. `on_success` is invoked exactly once when the provider
    /// accepts the credentials; every other outcome is reported through the
    /// form state and nothing escapes this call.
    ///
    /// A submit started while another is in flight returns immediately
    /// without touching the state. Dropping the returned future abandons
    /// the attempt, suppresses the callback and still resets the process
    /// state to idle.
    pub async fn submit(&self, on_success: impl FnOnce()) {
        let mut email = String::new();
        let mut password = String::new();
        let started = self.state.send_if_modified(|state| {
            if state.process_state.is_loading() {
                return false;
            }
            state.process_state = ProcessState::Loading;
            state.form_error = None;
            email = state.email.clone();
            password = state.password.clone();
            true
        });
        if !started {
            log::debug!("Login submit ignored, another one is in flight");
            return;
        }
        log::debug!("Login submit started");

        let _idle = IdleOnDrop(&self.state);

        tokio::time::sleep(self.options.submit_delay).await;

        if !self.validate(&email, &password) {
            log::debug!("Login submit rejected by validation");
            return;
        }

        match self.provider.authenticate(&email, &password).await {
            Ok(_session) => {
                log::debug!("Login submit succeeded");
                on_success();
            }
            Err(error) => {
                log::warn!("Login submit failed: {error:?}");
                self.state
                    .send_modify(|state| state.form_error = Some(LOGIN_FAILED.to_string()));
            }
        }
    }

    /// Applies the local checks to the submitted snapshot, replacing any
    /// field errors left over from a previous attempt. Returns false when
    /// the submit must end without a provider call.
    fn validate(&self, email: &str, password: &str) -> bool {
        let email_blank = validation::is_blank(email);
        let password_blank = validation::is_blank(password);
        let blank_email_policy = self.options.blank_email;

        let mut valid = true;
        self.state.send_modify(|state| {
            state.email_error = None;
            state.password_error = None;

            if email_blank && password_blank {
                state.email_error = Some(validation::EMPTY_EMAIL.to_string());
                state.password_error = Some(validation::EMPTY_PASSWORD.to_string());
                valid = false;
            } else if email_blank {
                if blank_email_policy == BlankEmailPolicy::Reject {
                    state.email_error = Some(validation::EMPTY_EMAIL.to_string());
                }
                valid = false;
            } else if password_blank {
                state.password_error = Some(validation::EMPTY_PASSWORD.to_string());
                valid = false;
            }
        });
        valid
    }
}

/// Resets the process state when a submit ends, on every path including
/// cancellation of the submit future.
struct IdleOnDrop<'a>(&'a watch::Sender<LoginFormState>);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0
            .send_modify(|state| state.process_state = ProcessState::Idle);
    }
}
