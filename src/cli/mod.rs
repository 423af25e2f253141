//! # CLI Module
//!
//! User-facing command implementations. Each command loads its
//! configuration, delegates to the management and API layers and presents
//! progress and results; unrecoverable failures terminate through the
//! `error!` macro.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth authorization-code flow and caches the token.
//! - [`run`] - One-shot pipeline: resolves the source playlist's albums to
//!   their preferred editions, prints a summary table, aggregates the full
//!   track list and publishes it as a new dated playlist while retiring the
//!   previous generation.
//! - [`serve`] - Long-running server mode with a browser login page; every
//!   completed login triggers the pipeline for the visiting user.
//!
//! ## Layering
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Resolution/Aggregation)
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```

mod auth;
mod run;
mod serve;

pub use auth::auth;
pub use run::run;
pub use serve::serve;
