use std::fmt::Display;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic tag for a review, from a fixed closed set
///
/// The wire format and the display string are both the variant name
/// ("Travel", "Electronics", ...). Free-text labels from external
/// datasets are normalized through [`Category::from_label`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    Travel,
    Electronics,
    Fashion,
    Restaurants,
    Books,
    Product,
    Food,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::Travel,
        Category::Electronics,
        Category::Fashion,
        Category::Restaurants,
        Category::Books,
        Category::Product,
        Category::Food,
        Category::Other,
    ];

    /// Case-insensitive lookup of a free-text label
    ///
    /// Returns `None` for labels outside the closed set. The dataset's
    /// legacy "others" label maps to `Other`.
    pub fn parse_label(label: &str) -> Option<Category> {
        match label.trim().to_lowercase().as_str() {
            "travel" => Some(Category::Travel),
            "electronics" => Some(Category::Electronics),
            "fashion" => Some(Category::Fashion),
            "restaurants" => Some(Category::Restaurants),
            "books" => Some(Category::Books),
            "product" => Some(Category::Product),
            "food" => Some(Category::Food),
            "other" | "others" => Some(Category::Other),
            _ => None,
        }
    }

    /// Normalizes a free-text label, coercing anything unrecognized to
    /// [`Category::Other`]
    pub fn from_label(label: &str) -> Category {
        Self::parse_label(label).unwrap_or(Category::Other)
    }

    /// Display name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Restaurants => "Restaurants",
            Category::Books => "Books",
            Category::Product => "Product",
            Category::Food => "Food",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-submitted review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique identifier for the review
    pub id: Uuid,
    /// Short summary line
    pub title: String,
    /// Full review body
    pub content: String,
    /// Star rating, always within 1..=5
    pub rating: u8,
    /// Topic tag
    pub category: Category,
    /// Display name of the reviewer
    pub author: String,
    /// Submission date, display-only
    pub date: NaiveDate,
}

impl Review {
    /// Creates a review dated today with a fresh id
    ///
    /// Callers validate the parts first: the rating must already be
    /// within 1..=5 and the text fields non-blank.
    pub fn new(
        title: String,
        content: String,
        rating: u8,
        category: Category,
        author: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            rating,
            category,
            author,
            date: Utc::now().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_review() {
        let review = Review::new(
            "Great battery life".to_string(),
            "Two full days per charge.".to_string(),
            4,
            Category::Electronics,
            "Sarah Chen".to_string(),
        );
        assert_eq!(review.title, "Great battery life");
        assert_eq!(review.rating, 4);
        assert_eq!(review.category, Category::Electronics);
        assert_eq!(review.date, Utc::now().date_naive());
    }

    #[test]
    fn test_parse_label_is_case_insensitive() {
        assert_eq!(Category::parse_label("travel"), Some(Category::Travel));
        assert_eq!(Category::parse_label("ELECTRONICS"), Some(Category::Electronics));
        assert_eq!(Category::parse_label("  Books "), Some(Category::Books));
    }

    #[test]
    fn test_parse_label_accepts_legacy_others() {
        assert_eq!(Category::parse_label("others"), Some(Category::Other));
        assert_eq!(Category::parse_label("other"), Some(Category::Other));
    }

    #[test]
    fn test_parse_label_rejects_unknown() {
        assert_eq!(Category::parse_label("beauty"), None);
        assert_eq!(Category::parse_label(""), None);
    }

    #[test]
    fn test_from_label_coerces_unknown_to_other() {
        assert_eq!(Category::from_label("beauty"), Category::Other);
        assert_eq!(Category::from_label("food"), Category::Food);
    }

    #[test]
    fn test_category_display_matches_wire_format() {
        for category in Category::ALL {
            let wire = serde_json::to_string(&category).unwrap();
            assert_eq!(wire, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_review_serde_round_trip() {
        let review = Review {
            id: Uuid::new_v4(),
            title: "Santorini - A Dream Trip".to_string(),
            content: "Stayed in Oia.".to_string(),
            rating: 5,
            category: Category::Travel,
            author: "Marco Rossi".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 22).unwrap(),
        };

        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("\"date\":\"2023-11-22\""));
        assert!(json.contains("\"category\":\"Travel\""));

        let back: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(back, review);
    }
}
