use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("container error: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("no archives found in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("artifact write failed: {}", .0.join("; "))]
    ArtifactWrites(Vec<String>),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BalerError>;
