use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("log directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("log path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
