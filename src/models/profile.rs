use serde::{Deserialize, Serialize};

use super::Category;

/// Most recent search terms kept in the history
const HISTORY_CAPACITY: usize = 10;

/// Shortest word worth keeping from a search query
const MIN_TERM_LEN: usize = 3;

/// Filler words dropped during keyword extraction
const STOPWORDS: &[&str] = &["what", "this", "that", "with", "from", "have", "your"];

/// Session-local user profile driving recommendation scoring
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Interest categories, in the order they were enabled
    pub interests: Vec<Category>,
    /// Lowercase search terms, oldest first, newest at the tail
    pub search_history: Vec<String>,
    /// Minimum star rating the user prefers, within 1..=5
    pub preferred_rating_min: u8,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
            interests: vec![Category::Travel, Category::Electronics, Category::Product],
            search_history: Vec::new(),
            preferred_rating_min: 4,
        }
    }
}

impl UserProfile {
    /// Adds or removes an interest category
    ///
    /// Returns true when the category is active after the call. The
    /// relative order of the remaining interests is preserved.
    pub fn toggle_interest(&mut self, category: Category) -> bool {
        if let Some(pos) = self.interests.iter().position(|c| *c == category) {
            self.interests.remove(pos);
            false
        } else {
            self.interests.push(category);
            true
        }
    }

    /// Records a search query in the history and returns the extracted terms
    ///
    /// Terms are appended in extraction order. A term already present moves
    /// to the tail instead of duplicating, so the tail always holds the most
    /// recently searched term (the one that earns the recency bonus when
    /// scoring). The history keeps at most [`HISTORY_CAPACITY`] entries,
    /// dropping the oldest first.
    pub fn record_search(&mut self, query: &str) -> Vec<String> {
        let terms = extract_search_terms(query);
        for term in &terms {
            if let Some(pos) = self.search_history.iter().position(|t| t == term) {
                self.search_history.remove(pos);
            }
            self.search_history.push(term.clone());
        }
        if self.search_history.len() > HISTORY_CAPACITY {
            let excess = self.search_history.len() - HISTORY_CAPACITY;
            self.search_history.drain(..excess);
        }
        terms
    }
}

/// Extracts scoring keywords from a raw search query
///
/// The query is lowercased and split on whitespace and `, ? ! .`; words
/// shorter than [`MIN_TERM_LEN`] characters and stopwords are dropped.
/// For queries of two or three words the full trimmed phrase is included
/// ahead of the individual words, so short multi-word searches can match
/// review text verbatim.
pub fn extract_search_terms(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let words = lowered
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '?' | '!' | '.'))
        .filter(|w| w.len() >= MIN_TERM_LEN && !STOPWORDS.contains(w))
        .map(str::to_string);

    let mut terms = Vec::new();
    let word_count = query.split_whitespace().count();
    if (2..=3).contains(&word_count) {
        terms.push(lowered.trim().to_string());
    }
    terms.extend(words);
    terms
}
