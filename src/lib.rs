//! Vantage web frontend: marketing shell, authentication forms, the email
//! verification sequencer, and the plan gate, rendered client-side with
//! Leptos. Pure control-flow modules compile natively so their tests run on
//! the host; everything touching the DOM or the network is wasm-only.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[path = "lib/mod.rs"]
pub mod app_lib;
#[cfg(target_arch = "wasm32")]
pub mod components;
pub mod features;
#[cfg(target_arch = "wasm32")]
pub mod routes;
