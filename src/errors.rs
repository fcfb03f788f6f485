use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the scan/plan/execute pipeline.
///
/// `NotFound` and `InvalidArgument` abort a run before anything is mutated.
/// `Move` is a per-file failure collected into the run report; it never
/// aborts the remaining batch.
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("source path does not exist or is not a directory: {0}")]
    NotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FileOpError {
    pub fn move_failed(from: &std::path::Path, to: &std::path::Path, source: io::Error) -> Self {
        FileOpError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }
}
