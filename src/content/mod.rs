/// Content module for folio
///
/// Project and post records, and the catalog that owns them.

pub mod catalog;
pub mod models;

pub use catalog::Catalog;
pub use models::*;
