use crate::app_lib::credentials;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !credentials::exists() {
            // UX-only guard; real access control must live on the API.
            navigate("/login", Default::default());
        }
    });

    view! { {children()} }
}
