// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{PlayerPreferences, RecordError, ScoredMatch, ScoringWeights};
pub use requests::{MatchQuery, PlayerPayload};
pub use responses::{ErrorResponse, HealthResponse};
