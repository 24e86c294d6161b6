//! Email verification route. The sequencer owns the control flow (one
//! exchange per token, replay absorption, failure classes); this component
//! wires it to the query parameters, the gateway action, the session store,
//! and the deferred navigation into the plan gate.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::{SessionContext, use_session};
use crate::features::verification::client;
use crate::features::verification::sequencer::{
    SuccessHandoff, VerificationSequencer, VerifyPhase,
};
use crate::features::verification::types::{ResendVerificationRequest, VerifyEmailRequest};
use crate::routes::query_flag;
use gloo_timers::callback::Timeout;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::{use_navigate, use_query_map};
use wasm_bindgen::JsValue;
use web_sys::window;

/// Delay before a verified visitor is moved on to plan selection, so the
/// success message is readable and the session refresh has a head start.
const SETTLE_DELAY_MS: u32 = 2_000;

#[derive(Clone, Debug, PartialEq)]
enum ResendStatus {
    Idle,
    Pending,
    Success,
    Error(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let session = use_session();
    let query = use_query_map();

    let token_param = query.with_untracked(|params| params.get("token"));
    let email_param = query.with_untracked(|params| params.get("email"));
    let awaiting_email = query.with_untracked(|params| query_flag(params.get("pending")));

    let sequencer = VerificationSequencer::new(
        token_param.as_deref(),
        awaiting_email,
        email_param.clone(),
    );
    let (phase, set_phase) = signal(sequencer.phase().clone());
    let sequencer = StoredValue::new(sequencer);
    let settle_timer = StoredValue::new_local(None::<Timeout>);

    let email_hint = email_param.clone();
    let verify_action = Action::new_local(move |token_value: &String| {
        let request = VerifyEmailRequest {
            token: token_value.clone(),
            email: email_hint.clone(),
        };
        async move { client::verify_email(&request).await }
    });

    // Every token arrival (the initial link, navigation churn, effect
    // re-runs) goes through the sequencer's ledger, so a token already
    // attempted never dispatches a second exchange.
    Effect::new(move |_| {
        let incoming = query
            .with(|params| params.get("token"))
            .or_else(|| token_param.clone());
        let Some(token_value) = incoming else {
            return;
        };
        let command = sequencer
            .try_update_value(|s| s.accept_token(&token_value))
            .flatten();
        if let Some(command) = command {
            set_phase.set(sequencer.with_value(|s| s.phase().clone()));
            verify_action.dispatch(command.token);
        }
        if query.with_untracked(|params| params.get("token")).is_some() {
            scrub_token_from_url();
        }
    });

    let navigate_on_success = use_navigate();
    Effect::new(move |_| {
        let Some(outcome) = verify_action.value().get() else {
            return;
        };
        let handoff = sequencer
            .try_update_value(|s| s.resolve_exchange(outcome))
            .flatten();
        set_phase.set(sequencer.with_value(|s| s.phase().clone()));

        let Some(handoff) = handoff else {
            return;
        };
        apply_success(handoff, session);

        let navigate = navigate_on_success.clone();
        let handle = Timeout::new(SETTLE_DELAY_MS, move || {
            navigate("/select-plan?verified=1", Default::default());
        });
        settle_timer.set_value(Some(handle));
    });

    // Never navigate a torn-down view.
    on_cleanup(move || {
        let _ = settle_timer.try_update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
    });

    let (resend_email, set_resend_email) = signal(String::new());
    let (resend_status, set_resend_status) = signal(ResendStatus::Idle);

    let resend_action = Action::new_local(move |email_value: &String| {
        let request = ResendVerificationRequest {
            email: email_value.clone(),
        };
        async move { client::resend_verification(&request).await }
    });

    Effect::new(move |_| {
        let Some(result) = resend_action.value().get() else {
            return;
        };
        match result {
            Ok(()) => {
                sequencer.update_value(|s| s.resend_accepted());
                set_phase.set(sequencer.with_value(|s| s.phase().clone()));
                set_resend_status.set(ResendStatus::Success);
            }
            Err(err) => set_resend_status.set(ResendStatus::Error(err.to_string())),
        }
    });

    let on_resend_click = move |_| {
        let typed = resend_email.get_untracked();
        match sequencer.with_value(|s| s.resend_target(&typed)) {
            Ok(email_value) if email_value.contains('@') => {
                set_resend_status.set(ResendStatus::Pending);
                resend_action.dispatch(email_value);
            }
            Ok(_) => {
                set_resend_status.set(ResendStatus::Error(
                    "Email address looks invalid.".to_string(),
                ));
            }
            Err(err) => set_resend_status.set(ResendStatus::Error(err.to_string())),
        }
    };

    view! {
        <AppShell>
            <div class="max-w-lg mx-auto">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Verify your email"
                </h1>
                {move || match phase.get() {
                    VerifyPhase::Pending => view! {
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Info
                                message="Check your inbox for the verification link.".to_string()
                            />
                        </div>
                    }
                    .into_any(),
                    VerifyPhase::Verifying => view! {
                        <div class="mt-4">
                            <Spinner />
                        </div>
                    }
                    .into_any(),
                    VerifyPhase::Success => view! {
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Success
                                message="Email verified. Taking you to plan selection.".to_string()
                            />
                        </div>
                    }
                    .into_any(),
                    VerifyPhase::Error { message, .. } => view! {
                        <div class="mt-4">
                            <Alert kind=AlertKind::Error message=message />
                        </div>
                    }
                    .into_any(),
                }}
                <div class="mt-8 rounded-lg border border-neutral-200 bg-white p-5 dark:border-neutral-700 dark:bg-neutral-800">
                    <h2 class="text-sm font-semibold text-gray-900 dark:text-white">"Need a new link?"</h2>
                    <p class="mt-1 text-sm text-gray-600 dark:text-gray-300">
                        "Enter your email to resend the verification link."
                    </p>
                    <div class="mt-4">
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="resend_email"
                        >
                            "Email"
                        </label>
                        <input
                            id="resend_email"
                            type="email"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500"
                            autocomplete="email"
                            placeholder="name@inbox.im"
                            on:input=move |event| set_resend_email.set(event_target_value(&event))
                        />
                    </div>
                    <div class="mt-4">
                        <Button
                            button_type="button"
                            disabled=resend_action.pending()
                            {..}
                            on:click=on_resend_click
                        >
                            "Resend verification"
                        </Button>
                    </div>
                    {move || {
                        resend_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    {move || match resend_status.get() {
                        ResendStatus::Idle | ResendStatus::Pending => None,
                        ResendStatus::Success => Some(view! {
                            <div class="mt-4">
                                <Alert
                                    kind=AlertKind::Success
                                    message="If that email exists, a new link is on the way.".to_string()
                                />
                            </div>
                        }),
                        ResendStatus::Error(message) => Some(view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=message />
                            </div>
                        }),
                    }}
                </div>
            </div>
        </AppShell>
    }
}

/// Applies a successful exchange: adopt any carried credential and user
/// record, optimistically mark the address verified, then refresh the
/// session authoritatively without blocking the visible success state.
fn apply_success(handoff: SuccessHandoff, session: SessionContext) {
    if let Some(credential) = handoff.adopt_credential.as_deref() {
        session.establish(credential, handoff.adopt_user.clone());
    } else if let Some(user) = handoff.adopt_user {
        session.set_user(user);
    }
    if handoff.optimistic {
        session.mark_email_verified();
    }
    spawn_local(async move {
        let _ = session.refresh().await;
    });
}

/// Drops the one-time token from the address bar once it has been consumed.
fn scrub_token_from_url() {
    let Some(window) = window() else {
        return;
    };
    let history = match window.history() {
        Ok(history) => history,
        Err(_) => return,
    };
    let _ = history.replace_state_with_url(&JsValue::NULL, "", Some("/verify-email"));
}
