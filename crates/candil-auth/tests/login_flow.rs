//! Integration tests for the login flow

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use candil_auth::{
    login::{LoginFlow, LOGIN_FAILED},
    validation, AuthClient, AuthError, BlankEmailPolicy, FlowOptions, ProcessState,
};
use candil_test::MockIdentityProvider;

const TEST_EMAIL: &str = "ana@example.com";
const TEST_PASSWORD: &str = "secreta";

fn test_options() -> FlowOptions {
    FlowOptions {
        submit_delay: Duration::from_millis(10),
        ..FlowOptions::default()
    }
}

fn make_flow(provider: Arc<MockIdentityProvider>) -> LoginFlow {
    AuthClient::with_options(provider, test_options()).login_flow()
}

mod submit_success_tests {
    use super::*;

    #[tokio::test]
    async fn successful_login_navigates_once() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider.clone());

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);

        let navigations = Arc::new(AtomicUsize::new(0));
        let counter = navigations.clone();
        flow.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert_eq!(navigations.load(Ordering::SeqCst), 1);
        assert_eq!(provider.authenticate_calls().await, 1);
        assert_eq!(
            provider.last_credentials().await,
            Some((TEST_EMAIL.to_string(), TEST_PASSWORD.to_string()))
        );

        let state = flow.form_state();
        assert_eq!(state.email_error, None);
        assert_eq!(state.password_error, None);
        assert_eq!(state.form_error, None);
        assert_eq!(state.process_state, ProcessState::Idle);
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_not_trimmed_from_credentials() {
        // Blank detection trims, but the submitted values reach the
        // provider exactly as typed
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider.clone());

        flow.set_email(" ana@example.com ");
        flow.set_password(TEST_PASSWORD);
        flow.submit(|| {}).await;

        assert_eq!(
            provider.last_credentials().await,
            Some((" ana@example.com ".to_string(), TEST_PASSWORD.to_string()))
        );
    }
}

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn blank_form_reports_both_fields() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider.clone());

        flow.submit(|| panic!("Blank form must not authenticate"))
            .await;

        let state = flow.form_state();
        assert_eq!(state.email_error.as_deref(), Some(validation::EMPTY_EMAIL));
        assert_eq!(
            state.password_error.as_deref(),
            Some(validation::EMPTY_PASSWORD)
        );
        assert_eq!(state.form_error, None);
        assert_eq!(state.process_state, ProcessState::Idle);
        assert_eq!(provider.authenticate_calls().await, 0);
    }

    #[tokio::test]
    async fn blank_password_reports_only_the_password() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider.clone());

        flow.set_email(TEST_EMAIL);
        flow.set_password("   ");
        flow.submit(|| panic!("Blank password must not authenticate"))
            .await;

        let state = flow.form_state();
        assert_eq!(state.email_error, None);
        assert_eq!(
            state.password_error.as_deref(),
            Some(validation::EMPTY_PASSWORD)
        );
        assert_eq!(provider.authenticate_calls().await, 0);
    }

    #[tokio::test]
    async fn blank_email_is_rejected_by_default() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider.clone());

        flow.set_password(TEST_PASSWORD);
        flow.submit(|| panic!("Blank email must not authenticate"))
            .await;

        let state = flow.form_state();
        assert_eq!(state.email_error.as_deref(), Some(validation::EMPTY_EMAIL));
        assert_eq!(state.password_error, None);
        assert_eq!(state.process_state, ProcessState::Idle);
        assert_eq!(provider.authenticate_calls().await, 0);
    }

    #[tokio::test]
    async fn blank_email_can_abort_silently() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = AuthClient::with_options(
            provider.clone(),
            FlowOptions {
                blank_email: BlankEmailPolicy::SilentAbort,
                ..test_options()
            },
        )
        .login_flow();

        flow.set_password(TEST_PASSWORD);
        flow.submit(|| panic!("Blank email must not authenticate"))
            .await;

        let state = flow.form_state();
        assert_eq!(state.email_error, None);
        assert_eq!(state.password_error, None);
        assert_eq!(state.form_error, None);
        assert_eq!(state.process_state, ProcessState::Idle);
        assert_eq!(provider.authenticate_calls().await, 0);
    }
}

mod provider_failure_tests {
    use super::*;

    #[tokio::test]
    async fn failed_login_reports_the_collapsed_message() {
        let provider = Arc::new(MockIdentityProvider::failing(
            AuthError::InvalidCredentials("EMAIL_NOT_FOUND".to_string()),
        ));
        let flow = make_flow(provider.clone());

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);
        flow.submit(|| panic!("Failed login must not navigate"))
            .await;

        let state = flow.form_state();
        assert_eq!(state.form_error.as_deref(), Some(LOGIN_FAILED));
        assert_eq!(state.email_error, None);
        assert_eq!(state.password_error, None);
        assert_eq!(state.process_state, ProcessState::Idle);
        assert_eq!(provider.authenticate_calls().await, 1);
    }

    #[tokio::test]
    async fn unreachable_provider_reports_the_same_message() {
        // The login screen does not distinguish bad credentials from an
        // outage
        let provider = Arc::new(MockIdentityProvider::failing(AuthError::Unavailable(
            "network down".to_string(),
        )));
        let flow = make_flow(provider);

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);
        flow.submit(|| panic!("Failed login must not navigate"))
            .await;

        assert_eq!(flow.form_state().form_error.as_deref(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn form_error_clears_at_the_start_of_the_next_submit() {
        let provider = Arc::new(MockIdentityProvider::failing(AuthError::Unavailable(
            "offline".to_string(),
        )));
        let flow = Arc::new(make_flow(provider.clone()));

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);
        flow.submit(|| {}).await;
        assert_eq!(flow.form_state().form_error.as_deref(), Some(LOGIN_FAILED));

        provider
            .set_outcome(Ok(MockIdentityProvider::test_session()))
            .await;

        let submitting = flow.clone();
        let navigations = Arc::new(AtomicUsize::new(0));
        let counter = navigations.clone();
        let handle = tokio::spawn(async move {
            submitting
                .submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .await
        });
        tokio::task::yield_now().await;

        // Cleared when the retry starts, not when it finishes
        let mid_submit = flow.form_state();
        assert!(mid_submit.process_state.is_loading());
        assert_eq!(mid_submit.form_error, None);

        handle.await.unwrap();
        assert_eq!(flow.form_state().form_error, None);
        assert_eq!(navigations.load(Ordering::SeqCst), 1);
    }
}

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn second_submit_is_ignored_while_the_first_is_in_flight() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = Arc::new(make_flow(provider.clone()));

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);

        let first = flow.clone();
        let navigations = Arc::new(AtomicUsize::new(0));
        let counter = navigations.clone();
        let handle = tokio::spawn(async move {
            first
                .submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .await
        });
        tokio::task::yield_now().await;
        assert!(flow.form_state().process_state.is_loading());

        // Returns immediately without disturbing the attempt in flight
        flow.submit(|| panic!("Re-entrant submit must not run")).await;

        handle.await.unwrap();
        assert_eq!(navigations.load(Ordering::SeqCst), 1);
        assert_eq!(provider.authenticate_calls().await, 1);
        assert_eq!(flow.form_state().process_state, ProcessState::Idle);
    }

    #[tokio::test]
    async fn edits_during_a_submit_do_not_reach_the_provider() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = Arc::new(make_flow(provider.clone()));

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);

        let submitting = flow.clone();
        let handle = tokio::spawn(async move { submitting.submit(|| {}).await });
        tokio::task::yield_now().await;

        flow.set_email("other@example.com");
        flow.set_password("other");

        handle.await.unwrap();
        assert_eq!(
            provider.last_credentials().await,
            Some((TEST_EMAIL.to_string(), TEST_PASSWORD.to_string()))
        );
        assert_eq!(flow.form_state().email, TEST_EMAIL);
        assert_eq!(flow.form_state().password, TEST_PASSWORD);
    }

    #[tokio::test]
    async fn cancelled_submit_resets_to_idle_without_navigating() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = Arc::new(make_flow(provider.clone()));

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);

        let submitting = flow.clone();
        let handle = tokio::spawn(async move {
            submitting
                .submit(|| panic!("Cancelled submit must not navigate"))
                .await
        });
        tokio::task::yield_now().await;
        assert!(flow.form_state().process_state.is_loading());

        // Screen dismissed mid-submit
        handle.abort();
        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());

        assert_eq!(flow.form_state().process_state, ProcessState::Idle);
        assert_eq!(provider.total_calls().await, 0);
    }

    #[tokio::test]
    async fn stale_field_errors_survive_until_validation_runs() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = Arc::new(make_flow(provider.clone()));

        flow.set_email(TEST_EMAIL);
        flow.submit(|| {}).await;
        assert_eq!(
            flow.form_state().password_error.as_deref(),
            Some(validation::EMPTY_PASSWORD)
        );

        flow.set_password(TEST_PASSWORD);
        let submitting = flow.clone();
        let handle = tokio::spawn(async move { submitting.submit(|| {}).await });
        tokio::task::yield_now().await;

        // The old message stays on screen through the pre-validation delay
        let mid_submit = flow.form_state();
        assert!(mid_submit.process_state.is_loading());
        assert_eq!(
            mid_submit.password_error.as_deref(),
            Some(validation::EMPTY_PASSWORD)
        );

        handle.await.unwrap();
        assert_eq!(flow.form_state().password_error, None);
        assert_eq!(provider.authenticate_calls().await, 1);
    }
}

mod state_publishing_tests {
    use super::*;

    #[tokio::test]
    async fn late_subscribers_replay_the_latest_state() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = make_flow(provider);

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);

        // Subscribing after the edits still yields the current snapshot
        let receiver = flow.subscribe();
        let state = receiver.borrow().clone();
        assert_eq!(state.email, TEST_EMAIL);
        assert_eq!(state.password, TEST_PASSWORD);
        assert_eq!(state.process_state, ProcessState::Idle);
    }

    #[tokio::test]
    async fn subscribers_observe_loading_and_the_final_state() {
        let provider = Arc::new(MockIdentityProvider::succeeding());
        let flow = Arc::new(make_flow(provider));

        flow.set_email(TEST_EMAIL);
        flow.set_password(TEST_PASSWORD);
        let mut receiver = flow.subscribe();

        let submitting = flow.clone();
        let handle = tokio::spawn(async move { submitting.submit(|| {}).await });
        tokio::task::yield_now().await;

        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().process_state.is_loading());

        handle.await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(
            receiver.borrow_and_update().process_state,
            ProcessState::Idle
        );
    }
}
