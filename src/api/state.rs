use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Review, UserProfile};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    /// Review feed, newest submissions first. Order is load-bearing:
    /// recommendation ties resolve by feed position.
    pub reviews: Vec<Review>,
    pub profile: UserProfile,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with an empty feed and the default profile
    pub fn new() -> Self {
        Self::with_reviews(Vec::new())
    }

    /// Creates state holding a pre-loaded review feed
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                reviews,
                profile: UserProfile::default(),
            })),
        }
    }
}
