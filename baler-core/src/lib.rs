#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod limit;

pub mod util {
    pub mod partname;
}

pub mod pack {
    pub mod planner;
    pub mod splitter;
    pub mod walker;
    pub mod writer;
}

pub mod read {
    pub mod extract;
}

// Re-exports: stable API surface
pub use error::{BalerError, Result};
pub use format::{Archiver, Format};
pub use pack::writer::compress;
pub use read::extract::decompress;
