//! Authenticated landing page. The workflow and findings surfaces are
//! rendered elsewhere; this shell stays intentionally minimal and does not
//! expose sensitive data.

use crate::components::AppShell;
use crate::features::auth::RequireAuth;
use crate::features::auth::state::use_session;
use leptos::prelude::*;

/// Renders the dashboard page shell.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let greeting = move || match session.user() {
        Some(user) => format!("Welcome back, {}.", user.name),
        None => "Welcome back.".to_string(),
    };

    view! {
        <RequireAuth>
            <AppShell>
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Workflows"</h1>
                <p class="mt-2 text-sm text-gray-600 dark:text-gray-300">{greeting}</p>
            </AppShell>
        </RequireAuth>
    }
}
