// Core algorithm exports
pub mod matcher;
pub mod scoring;

pub use matcher::{MatchLimit, MatchResult, Matcher, DEFAULT_LIMIT, DEFAULT_MIN_SCORE};
pub use scoring::{calculate_compatibility_score, shared_tags};
