//! Shared frontend utilities for API access, configuration, errors, session
//! credential storage, and build metadata.
//!
//! ## Core Authentication Flows
//!
//! ### Signup & Email Verification
//!
//! 1. **Register:** The client POSTs to `/v1/auth/register` and lands on the
//!    verification screen in pending mode.
//! 2. **Verification:** The user clicks a link whose query carries a one-time
//!    token, which the frontend exchanges via `/v1/auth/verify-email` —
//!    exactly once per token, however many times the effect re-runs.
//! 3. **Plan gate:** After the exchange settles, the user enters
//!    `/select-plan`, which reads the refreshed session and either shows the
//!    tiers or forwards into the app.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features. The session credential is an
//! opaque string; callers must still avoid logging sensitive data.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod build_info;
pub mod config;
#[cfg(target_arch = "wasm32")]
pub mod credentials;
pub mod errors;

#[cfg(target_arch = "wasm32")]
pub use api::{get_json_authed, post_empty_authed, post_json, post_json_authed_empty};
pub use errors::AppError;
