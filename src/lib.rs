/// folio library
///
/// Content core for a portfolio site: splits project descriptions into
/// sections and runs a debounced search over blog posts.

pub mod config;
pub mod content;
pub mod core;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use content::Catalog;
pub use error::{FolioError, Result};
