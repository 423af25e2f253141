//! # API Module
//!
//! HTTP endpoints served by the local listener.
//!
//! ## Endpoints
//!
//! - [`callback`] - One-shot OAuth redirect target. Verifies the `state`
//!   parameter and forwards the authorization code through a one-shot
//!   channel to the waiting login flow; a second hit finds the channel
//!   already consumed.
//! - [`index`] / [`redirect`] - Server mode: a login-link page and the
//!   redirect target that completes authentication for the visiting user
//!   and runs the playlist pipeline on their library.
//! - [`health`] - Status and version for monitoring.
//!
//! Built on [Axum](https://docs.rs/axum); shared state is passed through
//! request extensions.

mod callback;
mod health;
mod serve;

pub use callback::callback;
pub use health::health;
pub use serve::index;
pub use serve::redirect;
