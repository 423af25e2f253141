//! Release Radar Albums Library
//!
//! This library rebuilds a Spotify Release Radar playlist as a playlist of
//! complete albums. It fetches the source playlist, resolves every referenced
//! album to its preferred edition (explicit versions and long editions win),
//! aggregates the full track listings and publishes the result as a freshly
//! created playlist while retiring previously generated ones.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Credential and configuration file loading
//! - `error` - Error kinds used throughout the crate
//! - `management` - Album resolution, playlist aggregation and token caching
//! - `server` - Local HTTP server for OAuth callbacks and server mode
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Name cleaning, playlist naming and other helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible library code returns `Res<T>` and propagates failures with
/// `?`; the CLI layer decides which errors terminate the process.
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Used for general status updates throughout the application. Accepts the
/// same arguments as `println!`.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1 immediately after printing, so it must only be
/// used for unrecoverable errors at the CLI boundary. Accepts the same
/// arguments as `println!`.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, without terminating
/// the program. Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
