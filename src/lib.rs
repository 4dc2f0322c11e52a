//! Review feed with profile-driven recommendations
//!
//! Reviews live in process memory behind the shared [`api::AppState`].
//! The single session profile tracks interests, a bounded search history
//! and a rating threshold; the recommendation scorer ranks the feed
//! against it on demand. Catalogs can be seeded from a bundled JSON
//! dataset at startup or bulk-imported over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
