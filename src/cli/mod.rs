//! # CLI Module
//!
//! This module provides the command-line interface layer for Discography
//! Diary. Each function implements one subcommand: it reads a snapshot of the
//! collection, hands it to the view or ranking engine, persists the result
//! when something changed, and renders tables and status lines.
//!
//! ## Command Categories
//!
//! ### Catalog
//!
//! - [`search`] - Search Spotify for albums, optionally adding one result
//! - [`add`] - Add an album to the collection by its Spotify id
//! - [`serve`] - Run the catalog proxy
//!
//! ### Collection
//!
//! - [`list_albums`] - Sorted, decade-filtered and limited album listing
//! - [`show_album`] - Details of one saved album
//! - [`rate`] / [`notes`] - Rate (0-5) and annotate an album
//! - [`remove`] - Delete an album after confirmation
//! - [`open`] - Open an album in the browser
//!
//! ### Rankings and Statistics
//!
//! - [`rankings`] - Show and reorder the global or per-artist ranking
//! - [`artists`] - Artists in the collection with their album counts
//! - [`stats`] - Collection statistics
//!
//! ## Catalog Selection
//!
//! Catalog commands use the proxy named by `DISCODIARY_API_URL` when it is
//! set, and Spotify directly (client credentials from the environment)
//! otherwise.
//!
//! ## Positions
//!
//! Ranking positions on the command line are 1-based, matching the `#`
//! column of the ranking tables.

mod albums;
mod rankings;
mod search;
mod serve;
mod stats;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use albums::list_albums;
pub use albums::notes;
pub use albums::open;
pub use albums::rate;
pub use albums::remove;
pub use albums::show_album;
pub use rankings::artists;
pub use rankings::rankings;
pub use search::add;
pub use search::search;
pub use serve::serve;
pub use stats::stats;

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
