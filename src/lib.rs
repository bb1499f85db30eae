//! Resolves language-model movie and TV recommendations to catalog records.
//!
//! The core is [`services::resolver::resolve`]: given a recommendation and the
//! catalog's search results for its title, pick the one record it refers to.
//! The rest of the crate wires that into an HTTP API backed by TMDB (catalog)
//! and Gemini (recommendations).

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
