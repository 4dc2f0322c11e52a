use serde::Serialize;

use super::Review;

/// A review annotated with how well it matches the active profile
///
/// Derived afresh on every scoring pass and never stored; identity is the
/// wrapped review's id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedReview {
    #[serde(flatten)]
    pub review: Review,
    /// Relevance score, higher is a better match
    pub match_score: u32,
    /// Human-readable explanations, one per contributing rule or term
    pub match_reasons: Vec<String>,
}
