pub mod config;
pub mod dao;
pub mod db;
pub mod error;
pub mod exporter;
pub mod importer;
pub mod logging;
pub mod storage;
pub mod types;

// --- Library API shared by the two tools ---

/// Convenience re-exports for the binaries and embedders.
pub mod prelude {
    pub use crate::config::{ConnectionArgs, VerbosityArgs};
    pub use crate::db::Database;
    pub use crate::error::PipelineError;
    pub use crate::exporter::export_to;
    pub use crate::importer::{import_paths, ImportReport};
    pub use crate::logging::Logging;
    pub use crate::storage::RowSource;
    pub use crate::types::{ChartEntry, ChartFile, Hot100Row};
}
