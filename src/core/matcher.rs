use crate::core::scoring::calculate_compatibility_score;
use crate::models::{PlayerPreferences, ScoredMatch, ScoringWeights};

/// Minimum score a candidate needs unless the caller asks otherwise
pub const DEFAULT_MIN_SCORE: i64 = 4;

/// Number of matches returned unless the caller asks otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// How many ranked matches to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    Unbounded,
    AtMost(usize),
}

impl MatchLimit {
    /// Map a user-supplied count where `0` stands for "no limit"
    pub fn from_request(limit: usize) -> Self {
        if limit == 0 {
            MatchLimit::Unbounded
        } else {
            MatchLimit::AtMost(limit)
        }
    }
}

impl Default for MatchLimit {
    fn default() -> Self {
        MatchLimit::AtMost(DEFAULT_LIMIT)
    }
}

impl From<Option<usize>> for MatchLimit {
    fn from(value: Option<usize>) -> Self {
        value.map_or(MatchLimit::Unbounded, MatchLimit::AtMost)
    }
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Ranks candidates for a seeker by compatibility score
///
/// # Pipeline Stages
/// 1. Drop the seeker's own record
/// 2. Score each remaining candidate
/// 3. Keep candidates at or above the threshold
/// 4. Sort by score (descending), then player id (ascending)
/// 5. Truncate to the limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank candidates for `seeker`
    ///
    /// # Arguments
    /// * `seeker` - The player looking for teammates
    /// * `candidates` - Any candidate source; may contain the seeker
    /// * `min_score` - Inclusive score threshold
    /// * `limit` - Maximum number of matches to return
    pub fn rank<I>(
        &self,
        seeker: &PlayerPreferences,
        candidates: I,
        min_score: i64,
        limit: MatchLimit,
    ) -> MatchResult
    where
        I: IntoIterator<Item = PlayerPreferences>,
    {
        let mut total_candidates = 0;

        let mut scored_matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .filter(|candidate| candidate.player_id != seeker.player_id)
            .inspect(|_| total_candidates += 1)
            .filter_map(|candidate| {
                let score = calculate_compatibility_score(seeker, &candidate, &self.weights);
                (score >= min_score).then_some(ScoredMatch {
                    player: candidate,
                    score,
                })
            })
            .collect();

        scored_matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.player.player_id.cmp(&b.player.player_id))
        });

        if let MatchLimit::AtMost(limit) = limit {
            scored_matches.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} candidates for {} (min_score: {})",
            scored_matches.len(),
            total_candidates,
            seeker.player_id,
            min_score
        );

        MatchResult {
            matches: scored_matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
