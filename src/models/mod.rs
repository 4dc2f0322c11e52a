pub mod profile;
pub mod recommendation;
pub mod review;

pub use profile::{extract_search_terms, UserProfile};
pub use recommendation::RecommendedReview;
pub use review::{Category, Review};
