use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Category, Review};
use crate::services::providers::ReviewSource;

/// One entry from an external review dataset
///
/// Field names follow the collection pipeline's output (`item_name`,
/// `review_text`, `username`). Everything except the review text and the
/// rating is optional; conversion fills the gaps.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReviewRecord {
    #[serde(default)]
    pub item_name: Option<String>,
    pub review_text: String,
    pub rating: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Why a dataset record was rejected
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("rating {0} is not a whole number between 1 and 5")]
    InvalidRating(f64),

    #[error("review text is empty")]
    EmptyText,
}

/// Counts from a bulk import pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records converted into feed reviews
    pub imported: usize,
    /// Records skipped because an identical review already exists
    pub duplicates: usize,
    /// Records skipped because they failed validation
    pub invalid: usize,
}

/// Keyword table for inferring a category when a record carries no usable
/// label. Order matters: earlier entries win when keywords overlap.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Product,
        &["gadget", "cosmetics", "lotion", "watch", "soap", "cleaner"],
    ),
    (
        Category::Travel,
        &[
            "travel",
            "hotel",
            "flight",
            "trip",
            "destination",
            "vacation",
            "tour",
            "airline",
            "stayed",
        ],
    ),
    (
        Category::Food,
        &[
            "food",
            "snack",
            "cuisine",
            "noodles",
            "ghee",
            "paneer",
            "chocolate",
            "butter",
        ],
    ),
    (
        Category::Fashion,
        &[
            "clothing", "fashion", "shirt", "jeans", "dress", "outfit", "style", "shoes",
        ],
    ),
    (
        Category::Electronics,
        &[
            "laptop",
            "phone",
            "camera",
            "tablet",
            "monitor",
            "headphone",
            "earbud",
            "smartwatch",
            "iphone",
            "mouse",
            "keyboard",
            "macbook",
        ],
    ),
    (
        Category::Restaurants,
        &[
            "restaurant",
            "cafe",
            "bistro",
            "diner",
            "eatery",
            "buffet",
            "pizza",
        ],
    ),
    (
        Category::Books,
        &[
            "book",
            "novel",
            "author",
            "fiction",
            "kindle",
            "paperback",
            "biography",
            "memoir",
            "thriller",
            "mystery",
        ],
    ),
];

/// Infers a category from free text when the dataset label is unusable
///
/// Two passes: item names match on plain substrings (brand fragments
/// count), review bodies only on whole words so that e.g. "overbooked"
/// does not register as a book.
pub fn infer_category(item_name: &str, review_text: &str) -> Option<Category> {
    let item = item_name.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| item.contains(kw)) {
            return Some(*category);
        }
    }

    let text = review_text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| contains_word(&text, kw)) {
            return Some(*category);
        }
    }

    None
}

/// Whole-word containment check
fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric()).any(|w| w == word)
}

/// Converts one raw record into a feed review
///
/// The category comes from the record's label when it parses, otherwise
/// from keyword inference, with `Other` as the last resort. Absent or
/// malformed dates fall back to today.
pub fn convert_record(record: &RawReviewRecord) -> Result<Review, RecordError> {
    let content = record.review_text.trim();
    if content.is_empty() {
        return Err(RecordError::EmptyText);
    }

    let rating = parse_rating(record.rating)?;

    let item_name = record
        .item_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let category = record
        .category
        .as_deref()
        .and_then(Category::parse_label)
        .or_else(|| infer_category(item_name.unwrap_or(""), content))
        .unwrap_or(Category::Other);

    let author = record
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("anonymous");

    let date = record
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive());

    Ok(Review {
        id: Uuid::new_v4(),
        title: item_name.unwrap_or("Review").to_string(),
        content: content.to_string(),
        rating,
        category,
        author: author.to_string(),
        date,
    })
}

/// Validates a dataset rating. Ratings arrive as JSON numbers; only whole
/// values within 1..=5 construct a review.
fn parse_rating(value: f64) -> Result<u8, RecordError> {
    if value.fract() == 0.0 && (1.0..=5.0).contains(&value) {
        Ok(value as u8)
    } else {
        Err(RecordError::InvalidRating(value))
    }
}

/// Converts a batch of raw records, skipping invalid entries and entries
/// that duplicate a review already in the feed
///
/// Duplicate detection keys on the trimmed review text plus the review
/// date, matching the collection pipeline. Returns the new reviews in
/// record order together with the skip counts.
pub fn import_records(
    existing: &[Review],
    records: &[RawReviewRecord],
) -> (Vec<Review>, ImportSummary) {
    let mut seen: HashSet<(String, NaiveDate)> = existing
        .iter()
        .map(|r| (r.content.trim().to_string(), r.date))
        .collect();

    let mut imported = Vec::new();
    let mut summary = ImportSummary::default();

    for record in records {
        match convert_record(record) {
            Ok(review) => {
                let key = (review.content.clone(), review.date);
                if seen.contains(&key) {
                    summary.duplicates += 1;
                    tracing::debug!(title = %review.title, "Skipping duplicate review");
                    continue;
                }
                seen.insert(key);
                summary.imported += 1;
                imported.push(review);
            }
            Err(e) => {
                summary.invalid += 1;
                tracing::debug!(error = %e, "Skipping invalid record");
            }
        }
    }

    (imported, summary)
}

/// Loads reviews from a catalog source, dropping records that duplicate
/// the reviews already held
pub async fn load_from_source(
    source: &dyn ReviewSource,
    existing: &[Review],
) -> AppResult<Vec<Review>> {
    let records = source.fetch_records().await?;
    let (reviews, summary) = import_records(existing, &records);

    tracing::info!(
        source = source.name(),
        imported = summary.imported,
        duplicates = summary.duplicates,
        invalid = summary.invalid,
        "Catalog loaded from source"
    );

    Ok(reviews)
}

/// The built-in reviews every fresh feed starts with
pub fn demo_reviews() -> Vec<Review> {
    vec![
        Review {
            id: Uuid::new_v4(),
            title: "iPhone 15 Pro Max Review".to_string(),
            content: "The camera is phenomenal. The action button is a nice touch, but battery \
                      life is just okay for a pro model. Overall a solid buy for photography \
                      lovers."
                .to_string(),
            rating: 4,
            category: Category::Electronics,
            author: "Sarah Chen".to_string(),
            date: demo_date(2024, 3, 10),
        },
        Review {
            id: Uuid::new_v4(),
            title: "Santorini - A Dream Trip".to_string(),
            content: "Stayed in Oia. The sunset views are every bit as magical as people say. \
                      Highly recommend \"The Blue Note\" restaurant for authentic moussaka."
                .to_string(),
            rating: 5,
            category: Category::Travel,
            author: "Marco Rossi".to_string(),
            date: demo_date(2023, 11, 22),
        },
    ]
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockReviewSource;

    fn record(text: &str, rating: f64) -> RawReviewRecord {
        RawReviewRecord {
            item_name: Some("Generic item".to_string()),
            review_text: text.to_string(),
            rating,
            category: None,
            username: Some("tester".to_string()),
            date: Some("2024-01-15".to_string()),
        }
    }

    #[test]
    fn test_convert_record_maps_fields() {
        let mut raw = record("Crisp display and a light body.", 5.0);
        raw.item_name = Some("Zenbook laptop".to_string());
        raw.category = Some("electronics".to_string());

        let review = convert_record(&raw).unwrap();
        assert_eq!(review.title, "Zenbook laptop");
        assert_eq!(review.content, "Crisp display and a light body.");
        assert_eq!(review.rating, 5);
        assert_eq!(review.category, Category::Electronics);
        assert_eq!(review.author, "tester");
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_convert_record_defaults_missing_fields() {
        let raw = RawReviewRecord {
            item_name: None,
            review_text: "Decent enough.".to_string(),
            rating: 3.0,
            category: None,
            username: None,
            date: None,
        };

        let review = convert_record(&raw).unwrap();
        assert_eq!(review.title, "Review");
        assert_eq!(review.author, "anonymous");
        assert_eq!(review.category, Category::Other);
        assert_eq!(review.date, Utc::now().date_naive());
    }

    #[test]
    fn test_convert_record_rejects_fractional_rating() {
        let err = convert_record(&record("Fine.", 4.5)).unwrap_err();
        assert_eq!(err, RecordError::InvalidRating(4.5));
    }

    #[test]
    fn test_convert_record_rejects_out_of_range_rating() {
        assert!(matches!(
            convert_record(&record("Fine.", 0.0)),
            Err(RecordError::InvalidRating(_))
        ));
        assert!(matches!(
            convert_record(&record("Fine.", 6.0)),
            Err(RecordError::InvalidRating(_))
        ));
    }

    #[test]
    fn test_convert_record_rejects_blank_text() {
        let err = convert_record(&record("   ", 4.0)).unwrap_err();
        assert_eq!(err, RecordError::EmptyText);
    }

    #[test]
    fn test_malformed_date_falls_back_to_today() {
        let mut raw = record("Arrived on time.", 4.0);
        raw.date = Some("15/01/2024".to_string());

        let review = convert_record(&raw).unwrap();
        assert_eq!(review.date, Utc::now().date_naive());
    }

    #[test]
    fn test_unrecognized_label_falls_back_to_inference() {
        let mut raw = record("Perfect for long flights, hotel pickup was smooth.", 5.0);
        raw.item_name = Some("Kyoto guided tour".to_string());
        raw.category = Some("misc".to_string());

        let review = convert_record(&raw).unwrap();
        assert_eq!(review.category, Category::Travel);
    }

    #[test]
    fn test_inference_matches_item_name_substrings() {
        assert_eq!(
            infer_category("Sony headphones", "Silence at last."),
            Some(Category::Electronics)
        );
        assert_eq!(
            infer_category("Lavender soap bar", "Smells great."),
            Some(Category::Product)
        );
    }

    #[test]
    fn test_inference_requires_whole_words_in_text() {
        // "overbooked" contains "book" but is not a whole-word match
        assert_eq!(infer_category("", "Totally overbooked and chaotic."), None);
        assert_eq!(
            infer_category("", "A gripping novel about lighthouses."),
            Some(Category::Books)
        );
    }

    #[test]
    fn test_inference_order_prefers_earlier_categories() {
        // "watch" (product) wins over "smartwatch" (electronics)
        assert_eq!(
            infer_category("Aurora smartwatch", ""),
            Some(Category::Product)
        );
    }

    #[test]
    fn test_import_counts_duplicates_and_invalid() {
        let records = vec![
            record("Same text.", 4.0),
            record("Other text.", 5.0),
            record("Same text.", 4.0),
            record("Broken.", 9.0),
        ];

        let (reviews, summary) = import_records(&[], &records);
        assert_eq!(reviews.len(), 2);
        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                duplicates: 1,
                invalid: 1,
            }
        );
    }

    #[test]
    fn test_import_skips_records_already_in_feed() {
        let existing = convert_record(&record("Loved it.", 5.0)).unwrap();

        let (reviews, summary) = import_records(&[existing], &[record("Loved it.", 5.0)]);
        assert!(reviews.is_empty());
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn test_demo_reviews_cover_the_default_interests() {
        let demos = demo_reviews();
        assert_eq!(demos.len(), 2);
        assert_eq!(demos[0].category, Category::Electronics);
        assert_eq!(demos[0].rating, 4);
        assert_eq!(demos[1].category, Category::Travel);
        assert_eq!(demos[1].rating, 5);
    }

    #[tokio::test]
    async fn test_load_from_source_converts_records() {
        let mut source = MockReviewSource::new();
        source.expect_name().return_const("mock");
        source.expect_fetch_records().returning(|| {
            Ok(vec![RawReviewRecord {
                item_name: Some("Noise cancelling headphones".to_string()),
                review_text: "Silence at last.".to_string(),
                rating: 5.0,
                category: None,
                username: None,
                date: Some("2024-06-01".to_string()),
            }])
        });

        let reviews = load_from_source(&source, &[]).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].category, Category::Electronics);
        assert_eq!(reviews[0].title, "Noise cancelling headphones");
    }

    #[tokio::test]
    async fn test_load_from_source_propagates_errors() {
        let mut source = MockReviewSource::new();
        source.expect_name().return_const("mock");
        source.expect_fetch_records().returning(|| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing dataset").into())
        });

        let err = load_from_source(&source, &[]).await.unwrap_err();
        assert!(matches!(err, AppError::DatasetIo(_)));
    }
}
