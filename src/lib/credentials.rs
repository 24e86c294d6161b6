//! The single session credential persisted client-side. Stored and cleared
//! atomically with login/verification-success and logout. The credential is
//! an opaque string; nothing here inspects it.

use gloo_storage::{LocalStorage, Storage};

const CREDENTIAL_KEY: &str = "vantage.session";

/// Stores the session credential, replacing any previous one.
pub fn store(credential: &str) {
    let _ = LocalStorage::set(CREDENTIAL_KEY, credential);
}

/// Returns the stored credential, if any non-empty one exists.
pub fn load() -> Option<String> {
    LocalStorage::get::<String>(CREDENTIAL_KEY)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn exists() -> bool {
    load().is_some()
}

pub fn clear() {
    LocalStorage::delete(CREDENTIAL_KEY);
}
