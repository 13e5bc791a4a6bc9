use std::path::Path;
use std::str::FromStr;

use crate::error::{BalerError, Result};

/// Archive-format capability: one implementation per supported container.
pub trait Archiver: Send + Sync + std::fmt::Debug {
    fn compress(&self, source: &Path, dest: &Path, max_size_mib: u64) -> Result<()>;

    fn decompress(&self, source: &Path, dest: &Path) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Zip,
    Rar,
}

impl Format {
    /// Artifact file extension; decompress enumerates by this too.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Zip => "zip",
            Format::Rar => "rar",
        }
    }

    /// Resolve the implementation behind a format. Declared formats without
    /// one fail here, before any filesystem access.
    pub fn archiver(self) -> Result<Box<dyn Archiver>> {
        match self {
            Format::Zip => Ok(Box::new(ZipArchiver)),
            Format::Rar => Err(BalerError::UnsupportedFormat("rar".to_string())),
        }
    }
}

impl FromStr for Format {
    type Err = BalerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(Format::Zip),
            "rar" => Ok(Format::Rar),
            other => Err(BalerError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug)]
struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn compress(&self, source: &Path, dest: &Path, max_size_mib: u64) -> Result<()> {
        crate::pack::writer::compress(source, dest, max_size_mib)
    }

    fn decompress(&self, source: &Path, dest: &Path) -> Result<()> {
        crate::read::extract::decompress(source, dest)
    }
}
