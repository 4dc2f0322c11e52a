use crate::models::{RecommendedReview, Review, UserProfile};

/// Points for a review whose category is one of the profile's interests
const INTEREST_SCORE: u32 = 40;

/// Multiplier applied to the star rating when it clears the preferred minimum
const RATING_WEIGHT: u32 = 5;

/// Points for each search-history term found in the title or body
const SEARCH_MATCH_SCORE: u32 = 50;

/// Extra points when the matching term is the most recent search
const RECENCY_BONUS: u32 = 30;

/// Reviews scoring at or below this are not worth surfacing
const RELEVANCE_FLOOR: u32 = 10;

/// Upper bound on returned recommendations
const MAX_RECOMMENDATIONS: usize = 3;

/// Ranks a review feed against a profile and returns the best matches
///
/// Each review is scored independently: +40 when its category is among the
/// profile's interests, +rating*5 when its rating clears the preferred
/// minimum, and +50 per search-history term appearing (case-insensitively)
/// in the title or body, with a +30 bonus when that term is the most
/// recent search. Reviews scoring 10 or less are dropped. The survivors
/// come back sorted by descending score (feed order wins ties), capped at
/// three, each carrying the reasons behind its score.
///
/// Pure: inputs are never mutated and identical inputs always produce
/// identical output.
pub fn recommend(reviews: &[Review], profile: &UserProfile) -> Vec<RecommendedReview> {
    if reviews.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<RecommendedReview> = reviews
        .iter()
        .map(|review| score_review(review, profile))
        .filter(|rec| rec.match_score > RELEVANCE_FLOOR)
        .collect();

    // Stable sort keeps feed order for equal scores
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}

/// Scores a single review against the profile
fn score_review(review: &Review, profile: &UserProfile) -> RecommendedReview {
    let mut score: u32 = 0;
    let mut reasons: Vec<String> = Vec::new();

    // 1. Category affinity
    if profile.interests.contains(&review.category) {
        score += INTEREST_SCORE;
        push_reason(
            &mut reasons,
            format!("Matches your interest in {}", review.category),
        );
    }

    // 2. Rating quality
    if review.rating >= profile.preferred_rating_min {
        score += u32::from(review.rating) * RATING_WEIGHT;
        push_reason(
            &mut reasons,
            format!("High community rating ({}/5)", review.rating),
        );
    }

    // 3. Search-history relevance. The tail of the history is the most
    //    recent term; matching it earns the recency bonus. Comparison is
    //    by value, so duplicate occurrences of the tail term all qualify.
    let title = review.title.to_lowercase();
    let content = review.content.to_lowercase();
    let latest = profile.search_history.last();

    for term in &profile.search_history {
        let needle = term.to_lowercase();
        if title.contains(&needle) || content.contains(&needle) {
            score += SEARCH_MATCH_SCORE;
            if latest == Some(term) {
                score += RECENCY_BONUS;
                push_reason(
                    &mut reasons,
                    format!("Top match for your latest search: \"{}\"", term),
                );
            } else {
                push_reason(
                    &mut reasons,
                    format!("Relates to your search for \"{}\"", term),
                );
            }
        }
    }

    RecommendedReview {
        review: review.clone(),
        match_score: score,
        match_reasons: reasons,
    }
}

/// Appends a reason unless the identical string is already present
fn push_reason(reasons: &mut Vec<String>, reason: String) {
    if !reasons.contains(&reason) {
        reasons.push(reason);
    }
}
