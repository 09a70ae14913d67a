//! Spotify Web API proxy library
//!
//! A small HTTP backend that keeps one OAuth session with Spotify in memory and
//! forwards a handful of read and player calls on its behalf.
//!
//! # Modules
//!
//! - `api` - HTTP handlers, one per endpoint
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and its HTTP rendering
//! - `management` - The in-memory token store
//! - `server` - Router, middleware and listener
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Response shaping helpers
//!
//! # Example
//!
//! ```
//! use spotproxy::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotproxy::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!     server::serve(listener, server::AppState::new(config)).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges (startup, serving) where any error simply ends the
/// process. Handlers and the Spotify client use the typed errors in [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a console line with a blue bullet.
///
/// Console macros are for the operator running the binary (startup banner,
/// fatal setup errors). Request handling logs through `tracing`.
///
/// ```
/// info!("Open {} to authorize", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a console line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red console line and exits with status 1.
///
/// Only for failures that leave nothing to serve, such as a missing client
/// secret or a port that cannot be bound.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a console line with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
