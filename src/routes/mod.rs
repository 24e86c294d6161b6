mod dashboard;
mod health;
mod login;
mod not_found;
mod select_plan;
mod signup;
mod verify_email;

pub use dashboard::DashboardPage;
pub use health::HealthPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use select_plan::SelectPlanPage;
pub use signup::SignUpPage;
pub use verify_email::VerifyEmailPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Parses a boolean query flag such as `pending=1` or `verified=true`.
pub(crate) fn query_flag(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1" | "true" | "yes"))
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=DashboardPage />
            <Route path=path!("/health") view=HealthPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/verify-email") view=VerifyEmailPage />
            <Route path=path!("/select-plan") view=SelectPlanPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
