//! Email verification feature: the one-time token exchange sequencer, the
//! gateway client, and result classification. The sequencer guarantees the
//! gateway is invoked at most once per token value per page lifetime; a
//! server-side replay signal is absorbed as success.

#[cfg(target_arch = "wasm32")]
pub mod client;
pub mod sequencer;
pub mod types;
