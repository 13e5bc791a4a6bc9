use std::path::{Path, PathBuf};

use baler_core::error::{BalerError, Result};
use baler_core::format::Format;

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(BalerError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

pub fn handle_compress(source: PathBuf, dest: PathBuf, max_size: u64, format: String) -> Result<()> {
    // Resolve the format first so unsupported ones fail before any I/O.
    let archiver = format.parse::<Format>()?.archiver()?;
    ensure_dir(&source)?;
    ensure_dir(&dest)?;
    archiver.compress(&source, &dest, max_size)?;
    eprintln!("compress: {} -> {}", source.display(), dest.display());
    Ok(())
}

pub fn handle_decompress(source: PathBuf, dest: PathBuf, format: String) -> Result<()> {
    let archiver = format.parse::<Format>()?.archiver()?;
    ensure_dir(&source)?;
    ensure_dir(&dest)?;
    archiver.decompress(&source, &dest)?;
    eprintln!("decompress: {} -> {}", source.display(), dest.display());
    Ok(())
}
