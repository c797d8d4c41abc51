//! # API Module
//!
//! HTTP handlers of the Discography Diary catalog proxy. The proxy keeps the
//! Spotify client credentials on the server side, caches the resulting
//! client-credentials token, and forwards catalog lookups with it.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /`, status, version and the list of endpoints
//! - [`access_token`] - `GET /api/getAccessToken`, the cached app token
//! - [`search`] - `GET /api/search?q=&type=&limit=`, catalog search
//! - [`album`] - `GET /api/album/{id}`, album details
//!
//! ## Error Responses
//!
//! Failures are JSON objects with an `error` field and an optional `message`
//! or `details` field:
//! - 400 when a required query parameter is missing
//! - the upstream status when Spotify rejects the request, with its body text
//!   as `details`
//! - 500 for credential, transport and decoding failures
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use discodiary::{server, spotify::SpotifyCatalog};
//!
//! let app = server::router(SpotifyCatalog::from_env()?);
//! ```

mod album;
mod error;
mod health;
mod search;
mod token;

pub use album::album;
pub use error::{catalog_failure, error_body};
pub use health::health;
pub use search::{SearchParams, search};
pub use token::access_token;
