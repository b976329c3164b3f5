//! BG3 Connector - matchmaking for Baldur's Gate 3 co-op players
//!
//! This library holds the compatibility scorer and match ranker together with
//! the preference stores, HTTP routes and CLI commands built around them.

pub mod cli;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use core::{calculate_compatibility_score, MatchLimit, MatchResult, Matcher};
pub use models::{PlayerPreferences, RecordError, ScoredMatch, ScoringWeights};
pub use services::{connect_store, PreferenceStore, StoreError};
