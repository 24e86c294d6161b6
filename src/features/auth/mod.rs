//! Auth feature module covering the credential forms, session-snapshot
//! store, and route guarding. It keeps authentication logic out of the UI
//! and must avoid logging credentials or token material.
//!
//! Flow Overview: Login and register submit credentials and either hydrate
//! the session or route to the verification screen in pending mode. The
//! session store holds the `{user, organization}` snapshot; refreshes replace
//! fields wholesale so authoritative reads always win.

#[cfg(target_arch = "wasm32")]
pub mod client;
#[cfg(target_arch = "wasm32")]
mod guards;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod state;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub use guards::RequireAuth;
