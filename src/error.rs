/// Error types for folio
///
/// The parser and the search are total and never fail; these errors come from
/// the surrounding plumbing (content files, config, slug lookups).
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// I/O errors (reading content or config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two records in one content file share a slug
    #[error("Duplicate slug in content: {0}")]
    DuplicateSlug(String),

    /// No project with this slug
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// No post with this slug
    #[error("Post not found: {0}")]
    PostNotFound(String),
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Convert FolioError to a user-friendly error message
impl FolioError {
    pub fn user_message(&self) -> String {
        match self {
            FolioError::Io(e) => {
                format!("File system error. Check the path and permissions. Details: {}", e)
            }
            FolioError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            FolioError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            FolioError::DuplicateSlug(slug) => {
                format!("The slug '{}' is used more than once", slug)
            }
            FolioError::ProjectNotFound(slug) => {
                format!("No project named '{}'", slug)
            }
            FolioError::PostNotFound(slug) => {
                format!("No post named '{}'", slug)
            }
        }
    }
}
