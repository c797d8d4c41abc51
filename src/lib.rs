//! Discography Diary Library
//!
//! This library backs the `discodiary` command-line music diary. Albums are
//! looked up in the Spotify catalog, saved into a local collection file, rated,
//! annotated and ranked, and summarised through derived statistics. A small
//! HTTP proxy exposes the catalog lookups behind a cached client-credentials
//! token.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the catalog proxy
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Collection store and ranking engine
//! - `server` - HTTP server wiring for the catalog proxy
//! - `spotify` - Spotify Web API and proxy catalog clients
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `views` - Sorting, filtering and statistics over collection snapshots
//!
//! # Example
//!
//! ```
//! use discodiary::{config, management::CollectionStore};
//!
//! #[tokio::main]
//! async fn main() -> discodiary::Res<()> {
//!     config::load_env().await?;
//!     let store = CollectionStore::open_default();
//!     println!("{} albums", store.load().await.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod views;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. Subsystem errors such as
/// [`spotify::CatalogError`] and [`management::CollectionError`] convert into
/// it with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Searching for {}...", query);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("\"{}\" added to your collection!", album.name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the CLI layer uses this macro. Library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
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
/// Used for recoverable issues such as unreadable collection data or a
/// failed upstream request that is reported back to the caller.
///
/// # Example
///
/// ```
/// warning!("Spotify API error ({}): {}", status, body);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
