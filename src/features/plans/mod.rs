//! Plan gating feature: the pure gate decision plus the plan-update client.

#[cfg(target_arch = "wasm32")]
pub mod client;
pub mod gate;
pub mod types;
