// Debounced post search session
//
// Keeps what the user typed (live) apart from what the results were computed
// for (debounced). Keystrokes land in `query` right away; the debounced value
// only moves after the input has been quiet for the whole window.
//
// Every set_query/clear bumps a generation number. A scheduled commit carries
// the generation it was made for and does nothing if that's stale, so an old
// keystroke can never show up in the results even if its timer already fired.

use crate::content::BlogPost;
use crate::core::debounce::Debouncer;
use crate::core::searcher::Searcher;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Default quiescence window before a query takes effect
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(160);

/// The search box only shows on blog pages
pub const SEARCH_ROUTE_PREFIX: &str = "/blog";

/// Snapshot of a search session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub debounced: String,
    pub results: Vec<BlogPost>,
    pub open: bool,
    pub recomputations: u64,
    generation: u64,
}

struct Shared {
    state: Mutex<SearchState>,
    commits: watch::Sender<u64>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Search-as-you-type over the blog posts
pub struct PostSearch {
    searcher: Searcher,
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl PostSearch {
    pub fn new(corpus: Arc<Vec<BlogPost>>, window: Duration) -> Self {
        let (commits, _) = watch::channel(0);

        Self {
            searcher: Searcher::new(corpus),
            shared: Arc::new(Shared {
                state: Mutex::new(SearchState::default()),
                commits,
            }),
            debouncer: Debouncer::new(window),
        }
    }

    /// Record a keystroke and schedule it to become the active query
    ///
    /// The raw value is visible immediately through `query()`. Results only
    /// change once no other set_query arrives for the debounce window.
    /// Opens the results panel. Needs a tokio runtime.
    pub fn set_query(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        let committed = raw.trim().to_string();

        let generation = {
            let mut state = self.shared.lock();
            state.query = raw;
            state.open = true;
            state.generation += 1;
            state.generation
        };

        let shared = Arc::clone(&self.shared);
        let searcher = self.searcher.clone();
        self.debouncer.schedule(move || {
            commit(&shared, &searcher, generation, committed);
        });
    }

    /// Reset to an empty, closed search with no results
    pub fn clear(&mut self) {
        self.debouncer.cancel();

        let recomputations = {
            let mut state = self.shared.lock();
            state.query.clear();
            state.debounced.clear();
            state.results.clear();
            state.open = false;
            state.generation += 1;
            state.recomputations
        };

        self.shared.commits.send_replace(recomputations);
    }

    /// Input got focus
    pub fn focus(&self) {
        self.shared.lock().open = true;
    }

    /// Escape pressed: close the panel, keep the query
    pub fn dismiss(&self) {
        self.shared.lock().open = false;
    }

    /// A result was picked. Closes the panel and hands back the post to open.
    pub fn select(&self, slug: &str) -> Option<BlogPost> {
        let mut state = self.shared.lock();
        state.open = false;
        state.results.iter().find(|p| p.slug == slug).cloned()
    }

    pub fn query(&self) -> String {
        self.shared.lock().query.clone()
    }

    pub fn debounced_query(&self) -> String {
        self.shared.lock().debounced.clone()
    }

    pub fn results(&self) -> Vec<BlogPost> {
        self.shared.lock().results.clone()
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().open
    }

    /// How many times results were recomputed from a committed query
    pub fn recomputations(&self) -> u64 {
        self.shared.lock().recomputations
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn state(&self) -> SearchState {
        self.shared.lock().clone()
    }

    /// Message for a committed query that found nothing
    pub fn no_results_message(&self) -> Option<String> {
        let state = self.shared.lock();
        if !state.debounced.is_empty() && state.results.is_empty() {
            Some(format!("No results for \"{}\".", state.debounced))
        } else {
            None
        }
    }

    /// Watch for commits. The value is the recomputation count.
    ///
    /// `clear()` also notifies, so a presentation layer can redraw.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.commits.subscribe()
    }
}

fn commit(shared: &Shared, searcher: &Searcher, generation: u64, query: String) {
    let recomputations = {
        let mut state = shared.lock();
        if state.generation != generation {
            return;
        }

        state.results = searcher.search(&query);
        state.debounced = query;
        state.recomputations += 1;

        debug!(
            query = %state.debounced,
            results = state.results.len(),
            "search query committed"
        );
        state.recomputations
    };

    shared.commits.send_replace(recomputations);
}

/// Type `query` into a fresh session one character at a time and wait for
/// the commit
///
/// Only the full query commits; the prefixes fall inside the debounce window.
/// The session is seeded with an empty query first, so an empty `query`
/// still commits (to no results) instead of waiting forever.
pub async fn run_search(corpus: Arc<Vec<BlogPost>>, window: Duration, query: &str) -> PostSearch {
    let mut search = PostSearch::new(corpus, window);
    let mut commits = search.subscribe();

    search.set_query(String::new());
    let mut typed = String::new();
    for ch in query.chars() {
        typed.push(ch);
        search.set_query(typed.clone());
    }

    // The sender lives in `search`, so this only returns Err if it's dropped
    if commits.changed().await.is_err() {
        debug!("search session closed before committing");
    }

    search
}

/// Whether the search box belongs on this page
pub fn is_search_route(path: &str) -> bool {
    path.starts_with(SEARCH_ROUTE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, excerpt: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            content: None,
            date: "Dec 2025".to_string(),
            read_time: "5 min".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
        }
    }

    fn corpus() -> Arc<Vec<BlogPost>> {
        Arc::new(vec![
            post("redis-guide", "Redis Guide", "caching basics", &["redis"]),
            post("cors-explained", "CORS Explained", "browser security", &["security"]),
        ])
    }

    fn setup() -> PostSearch {
        PostSearch::new(corpus(), DEFAULT_DEBOUNCE)
    }

    async fn settle() {
        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
    }

    fn slugs(posts: &[BlogPost]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_visible_before_commit() {
        let mut search = setup();

        search.set_query("red");
        assert_eq!(search.query(), "red");
        assert_eq!(search.debounced_query(), "");
        assert!(search.results().is_empty());
        assert!(search.is_pending());

        settle().await;
        assert_eq!(search.debounced_query(), "red");
        assert_eq!(slugs(&search.results()), vec!["redis-guide"]);
        assert!(!search.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_once_with_last_value() {
        let mut search = setup();

        search.set_query("r");
        tokio::time::sleep(Duration::from_millis(50)).await;
        search.set_query("re");
        settle().await;

        assert_eq!(search.recomputations(), 1);
        assert_eq!(search.debounced_query(), "re");
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_commit_each() {
        let mut search = setup();

        search.set_query("redis");
        settle().await;
        search.set_query("security");
        settle().await;

        assert_eq!(search.recomputations(), 2);
        assert_eq!(slugs(&search.results()), vec!["cors-explained"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_is_trimmed_on_commit() {
        let mut search = setup();

        search.set_query("  redis  ");
        settle().await;

        assert_eq!(search.query(), "  redis  ");
        assert_eq!(search.debounced_query(), "redis");
        assert_eq!(search.results().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_has_no_results() {
        let mut search = setup();

        search.set_query("redis");
        settle().await;
        search.set_query("   ");
        settle().await;

        assert!(search.results().is_empty());
        assert_eq!(search.no_results_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_results_message() {
        let mut search = setup();

        search.set_query("zzz");
        settle().await;

        assert_eq!(
            search.no_results_message().as_deref(),
            Some("No results for \"zzz\".")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_resets_everything() {
        let mut search = setup();

        search.set_query("redis");
        settle().await;
        search.set_query("cors");
        search.clear();

        let state = search.state();
        assert_eq!(state.query, "");
        assert_eq!(state.debounced, "");
        assert!(state.results.is_empty());
        assert!(!state.open);
        assert!(!search.is_pending());

        // the "cors" commit was cancelled
        settle().await;
        assert_eq!(search.recomputations(), 1);
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_on_fresh_session() {
        let mut search = setup();
        search.clear();

        let state = search.state();
        assert!(state.query.is_empty());
        assert!(state.debounced.is_empty());
        assert!(state.results.is_empty());
        assert!(!state.open);
        assert_eq!(state.recomputations, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_state() {
        let mut search = setup();
        assert!(!search.is_open());

        search.focus();
        assert!(search.is_open());

        search.dismiss();
        assert!(!search.is_open());
        search.set_query("r");
        assert!(search.is_open());

        // dismiss keeps the query
        search.dismiss();
        assert_eq!(search.query(), "r");
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_closes_panel() {
        let mut search = setup();

        search.set_query("redis");
        settle().await;

        let picked = search.select("redis-guide");
        assert_eq!(picked.map(|p| p.slug), Some("redis-guide".to_string()));
        assert!(!search.is_open());

        assert!(search.select("cors-explained").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_commit() {
        let mut search = setup();
        let mut commits = search.subscribe();

        search.set_query("cors");
        commits.changed().await.unwrap();

        assert_eq!(*commits.borrow_and_update(), 1);
        assert_eq!(slugs(&search.results()), vec!["cors-explained"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_commit_is_ignored() {
        let search = setup();

        // a commit whose generation is already behind
        search.shared.lock().generation = 5;
        commit(&search.shared, &search.searcher, 4, "redis".to_string());

        assert_eq!(search.recomputations(), 0);
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_search_empty_query_commits() {
        let search = run_search(corpus(), DEFAULT_DEBOUNCE, "").await;

        assert_eq!(search.recomputations(), 1);
        assert!(search.results().is_empty());
        assert_eq!(search.no_results_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_search_blank_query() {
        let search = run_search(corpus(), DEFAULT_DEBOUNCE, "   ").await;

        assert_eq!(search.recomputations(), 1);
        assert_eq!(search.debounced_query(), "");
        assert!(search.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_search_commits_full_query_once() {
        let search = run_search(corpus(), DEFAULT_DEBOUNCE, "redis").await;

        assert_eq!(search.recomputations(), 1);
        assert_eq!(search.debounced_query(), "redis");
        assert_eq!(slugs(&search.results()), vec!["redis-guide"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_search_no_match() {
        let search = run_search(corpus(), DEFAULT_DEBOUNCE, "zzz").await;

        assert_eq!(
            search.no_results_message().as_deref(),
            Some("No results for \"zzz\".")
        );
    }

    #[test]
    fn test_is_search_route() {
        assert!(is_search_route("/blog"));
        assert!(is_search_route("/blog/how-cors-works-under-the-hood"));
        assert!(!is_search_route("/projects"));
        assert!(!is_search_route("/"));
    }
}
