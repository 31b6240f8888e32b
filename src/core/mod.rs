/// Core functionality modules
///
/// Long-description sectioning and the debounced post search.
/// The two don't depend on each other.

pub mod debounce;
pub mod post_search;
pub mod searcher;
pub mod section_parser;

pub use debounce::Debouncer;
pub use post_search::{is_search_route, run_search, PostSearch, SearchState, DEFAULT_DEBOUNCE};
pub use searcher::{filter_posts, Searcher};
pub use section_parser::SectionParser;
