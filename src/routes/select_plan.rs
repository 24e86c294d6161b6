//! Plan selection route, the gate between a verified session and the rest of
//! the application. The decision itself is pure (`features::plans::gate`);
//! this component fetches the session records, tolerates the propagation lag
//! after a fresh verification with a single delayed refetch, and drives the
//! plan-update call.

use crate::app_lib::{AppError, credentials};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::state::{SessionContext, use_session};
use crate::features::auth::types::Plan;
use crate::features::plans::client;
use crate::features::plans::gate::{GateDecision, GateInput, evaluate};
use crate::features::plans::types::UpdatePlanRequest;
use crate::routes::query_flag;
use gloo_timers::future::TimeoutFuture;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::{use_navigate, use_query_map};

/// Pause before the single stale-session refetch after a fresh verification.
const PROPAGATION_RETRY_MS: u32 = 1_500;

#[derive(Clone, Debug, PartialEq)]
enum GateStatus {
    Deciding,
    ShowPlans,
    Leaving,
}

#[component]
pub fn SelectPlanPage() -> impl IntoView {
    let session = use_session();
    let query = use_query_map();
    let just_verified = query.with_untracked(|params| query_flag(params.get("verified")));

    let (status, set_status) = signal(GateStatus::Deciding);
    let (selected, set_selected) = signal(None::<Plan>);
    let (error, set_error) = signal(None::<String>);

    // The gate runs once per entry.
    let navigate_gate = use_navigate();
    spawn_local(async move {
        match run_gate(session, just_verified).await {
            GateDecision::RedirectLogin => {
                set_status.set(GateStatus::Leaving);
                navigate_gate("/login", Default::default());
            }
            GateDecision::RedirectVerify => {
                set_status.set(GateStatus::Leaving);
                navigate_gate("/verify-email?pending=1", Default::default());
            }
            GateDecision::Forward => {
                set_status.set(GateStatus::Leaving);
                navigate_gate("/dashboard", Default::default());
            }
            GateDecision::ShowPlans | GateDecision::RetryRefresh => {
                set_status.set(GateStatus::ShowPlans);
            }
        }
    });

    let submit_action = Action::new_local(move |plan: &Plan| {
        let plan = *plan;
        async move {
            client::update_organization_plan(&UpdatePlanRequest { plan }).await?;
            session.refresh_organization().await?;
            Ok::<(), AppError>(())
        }
    });

    let navigate_submit = use_navigate();
    Effect::new(move |_| {
        let Some(result) = submit_action.value().get() else {
            return;
        };
        match result {
            Ok(()) => {
                set_status.set(GateStatus::Leaving);
                navigate_submit("/dashboard", Default::default());
            }
            Err(err) => {
                // roll the selection back so the user can retry in place
                set_selected.set(None);
                set_error.set(Some(err.to_string()));
            }
        }
    });

    let choose = move |plan: Plan| {
        if submit_action.pending().get_untracked() {
            return;
        }
        set_error.set(None);
        set_selected.set(Some(plan));
        submit_action.dispatch(plan);
    };

    view! {
        <AppShell>
            <div class="max-w-4xl mx-auto">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    "Choose your plan"
                </h1>
                {move || match status.get() {
                    GateStatus::Deciding | GateStatus::Leaving => view! {
                        <div class="mt-4">
                            <Spinner />
                        </div>
                    }
                    .into_any(),
                    GateStatus::ShowPlans => view! {
                        <div class="mt-4">
                            {move || {
                                error
                                    .get()
                                    .map(|message| {
                                        view! {
                                            <div class="mb-4">
                                                <Alert kind=AlertKind::Error message=message />
                                            </div>
                                        }
                                    })
                            }}
                            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                                {Plan::CHOICES
                                    .into_iter()
                                    .map(|plan| {
                                        let is_selected = move || selected.get() == Some(plan);
                                        view! {
                                            <div
                                                class="rounded-lg border border-neutral-200 bg-white p-5 dark:border-neutral-700 dark:bg-neutral-800"
                                                class:ring-2=is_selected
                                                class:ring-blue-500=is_selected
                                            >
                                                <h2 class="text-sm font-semibold text-gray-900 dark:text-white">
                                                    {plan.label()}
                                                </h2>
                                                <p class="mt-1 text-sm text-gray-600 dark:text-gray-300">
                                                    {plan_blurb(plan)}
                                                </p>
                                                <div class="mt-4">
                                                    <Button
                                                        button_type="button"
                                                        disabled=submit_action.pending()
                                                        {..}
                                                        on:click=move |_| choose(plan)
                                                    >
                                                        {format!("Choose {}", plan.label())}
                                                    </Button>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            {move || {
                                submit_action
                                    .pending()
                                    .get()
                                    .then_some(view! { <div class="mt-4"><Spinner /></div> })
                            }}
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </AppShell>
    }
}

/// Resolves the gate to a terminal decision: fetch what is missing, and after
/// a fresh verification tolerate one stale read by pausing and refetching the
/// user a single time. The earlier exchange already succeeded server-side, so
/// the outcome of the refetch is not re-litigated.
async fn run_gate(session: SessionContext, just_verified: bool) -> GateDecision {
    if !credentials::exists() {
        return GateDecision::RedirectLogin;
    }
    if session.user_untracked().is_none() {
        let _ = session.refresh_user().await;
    }
    if session.organization_untracked().is_none() {
        let _ = session.refresh_organization().await;
    }

    let decision = decide(&session, just_verified, false);
    if decision != GateDecision::RetryRefresh {
        return decision;
    }

    TimeoutFuture::new(PROPAGATION_RETRY_MS).await;
    let _ = session.refresh_user().await;
    decide(&session, just_verified, true)
}

fn decide(session: &SessionContext, just_verified: bool, retried: bool) -> GateDecision {
    let user = session.user_untracked();
    let organization = session.organization_untracked();
    evaluate(GateInput {
        authenticated: credentials::exists(),
        user: user.as_ref(),
        organization: organization.as_ref(),
        just_verified,
        retried,
    })
}

fn plan_blurb(plan: Plan) -> &'static str {
    match plan {
        Plan::Free => "Explore workflows and findings with community limits.",
        Plan::Standard => "For small teams automating their first investigations.",
        Plan::Pro => "Higher run volume, longer retention, priority support.",
        Plan::Enterprise => "Custom limits, SSO, and a dedicated environment.",
    }
}
