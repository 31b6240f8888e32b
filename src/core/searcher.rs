/// Post searcher with substring matching
///
/// Case-insensitive substring search over title, excerpt and tags.
/// No ranking: matches come back in corpus order.

use crate::content::BlogPost;
use std::sync::Arc;

/// Handles post searching over a fixed corpus
#[derive(Debug, Clone)]
pub struct Searcher {
    corpus: Arc<Vec<BlogPost>>,
}

impl Searcher {
    /// Create a new searcher over a shared corpus
    pub fn new(corpus: Arc<Vec<BlogPost>>) -> Self {
        Self { corpus }
    }

    /// Search posts by substring
    ///
    /// # Arguments
    /// * `query` - Already debounced and trimmed query
    ///
    /// # Returns
    /// * Matching posts in corpus order, empty for an empty query
    pub fn search(&self, query: &str) -> Vec<BlogPost> {
        filter_posts(query, &self.corpus)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn corpus(&self) -> &[BlogPost] {
        &self.corpus
    }
}

/// Posts whose title, excerpt or any tag contains the query, ignoring case
///
/// An empty query matches nothing; it means "no active search".
pub fn filter_posts<'a>(query: &str, corpus: &'a [BlogPost]) -> Vec<&'a BlogPost> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|post| matches_post(post, &needle))
        .collect()
}

// `needle` must already be lowercase
fn matches_post(post: &BlogPost, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
