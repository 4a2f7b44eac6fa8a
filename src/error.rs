use std::path::PathBuf;

use thiserror::Error;

/// Faults the import/export pipeline classifies rather than just propagating.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stored row cannot be rendered because a column is NULL
    #[error("row has no {0}")]
    MissingField(&'static str),

    /// A chart file is not valid JSON (or not the expected shape)
    #[error("error parsing JSON file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Every row failed to render, or the relation was empty
    #[error("no valid rows were generated")]
    NoRows,

    /// The HTML template references a slot that was not filled, or vice versa
    #[error("template error: {0}")]
    Template(String),
}
