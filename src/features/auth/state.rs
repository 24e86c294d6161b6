//! Session store context for the frontend. The provider hydrates the
//! snapshot once on mount when a credential is stored, and every write goes
//! through the context's own methods so refreshes stay wholesale and the
//! authoritative value always wins over an optimistic patch.

use crate::app_lib::{AppError, credentials};
use crate::features::auth::{
    client,
    session::SessionSnapshot,
    types::{Organization, User},
};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Session context shared through Leptos.
pub struct SessionContext {
    snapshot: RwSignal<SessionSnapshot>,
    pub is_authenticated: Signal<bool>,
}

impl SessionContext {
    /// Builds a context around the provided snapshot signal.
    fn new(snapshot: RwSignal<SessionSnapshot>) -> Self {
        let is_authenticated = Signal::derive(move || snapshot.with(|s| s.is_authenticated()));
        Self {
            snapshot,
            is_authenticated,
        }
    }

    /// Reactive read of the current user record.
    pub fn user(&self) -> Option<User> {
        self.snapshot.with(|s| s.user.clone())
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.snapshot.with_untracked(|s| s.user.clone())
    }

    pub fn organization_untracked(&self) -> Option<Organization> {
        self.snapshot.with_untracked(|s| s.organization.clone())
    }

    /// Replaces the user record wholesale.
    pub fn set_user(&self, user: User) {
        self.snapshot.update(|s| s.replace_user(user));
    }

    /// Replaces the organization record wholesale.
    pub fn set_organization(&self, organization: Organization) {
        self.snapshot.update(|s| s.replace_organization(organization));
    }

    /// Optimistically marks the loaded user verified ahead of a refresh.
    pub fn mark_email_verified(&self) {
        self.snapshot.update(|s| s.mark_email_verified());
    }

    /// Stores the session credential and seeds the snapshot after a login or
    /// a verification exchange that carried one.
    pub fn establish(&self, credential: &str, user: Option<User>) {
        credentials::store(credential);
        if let Some(user) = user {
            self.set_user(user);
        }
    }

    /// Clears the credential and the in-memory snapshot, typically on logout.
    pub fn sign_out(&self) {
        credentials::clear();
        self.snapshot.update(|s| s.clear());
    }

    /// Authoritative user refresh; replaces the snapshot field wholesale.
    pub async fn refresh_user(self) -> Result<(), AppError> {
        let user = client::fetch_user().await?;
        self.set_user(user);
        Ok(())
    }

    /// Authoritative organization refresh; replaces the snapshot field wholesale.
    pub async fn refresh_organization(self) -> Result<(), AppError> {
        let organization = client::fetch_organization().await?;
        self.set_organization(organization);
        Ok(())
    }

    /// Refreshes both records.
    pub async fn refresh(self) -> Result<(), AppError> {
        self.refresh_user().await?;
        self.refresh_organization().await
    }
}

/// Provides the session context and hydrates the snapshot once on mount.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let snapshot = RwSignal::new(SessionSnapshot::default());
    let session = SessionContext::new(snapshot);
    provide_context(session);

    if credentials::exists() {
        spawn_local(async move {
            let _ = session.refresh().await;
        });
    }

    view! { {children()} }
}

/// Returns the current session context or a fallback empty context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| {
        let snapshot = RwSignal::new(SessionSnapshot::default());
        SessionContext::new(snapshot)
    })
}
