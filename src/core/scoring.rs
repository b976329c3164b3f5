use crate::models::{PlayerPreferences, ScoringWeights};

/// Calculate the compatibility score between a seeker and a candidate
///
/// Scoring formula:
/// score = (
///     platform     * [seeker.platform == candidate.platform] +
///     game_mode    * [seeker.game_mode == candidate.game_mode] +
///     level_range  * [seeker.level_range == candidate.level_range] +
///     voice_chat   * [seeker.voice_chat == candidate.voice_chat] +
///     timezone     * [seeker.timezone == candidate.timezone] +
///     tags         * |seeker.tags ∩ candidate.tags|
/// )
///
/// Comparisons are case-sensitive. The score is symmetric in its two records.
pub fn calculate_compatibility_score(
    seeker: &PlayerPreferences,
    candidate: &PlayerPreferences,
    weights: &ScoringWeights,
) -> i64 {
    let categorical = [
        (&seeker.platform, &candidate.platform, weights.platform),
        (&seeker.game_mode, &candidate.game_mode, weights.game_mode),
        (&seeker.level_range, &candidate.level_range, weights.level_range),
        (&seeker.voice_chat, &candidate.voice_chat, weights.voice_chat),
        (&seeker.timezone, &candidate.timezone, weights.timezone),
    ];

    let attribute_score: i64 = categorical
        .iter()
        .filter(|(ours, theirs, _)| ours == theirs)
        .map(|(_, _, weight)| weight)
        .sum();

    let shared = seeker.tags.intersection(&candidate.tags).count() as i64;

    attribute_score + weights.tags * shared
}

/// Tags both players carry, sorted
pub fn shared_tags(seeker: &PlayerPreferences, candidate: &PlayerPreferences) -> Vec<String> {
    seeker.tags.intersection(&candidate.tags).cloned().collect()
}
