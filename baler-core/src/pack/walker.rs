use std::path::Path;

use walkdir::WalkDir;

use crate::error::{BalerError, Result};
use crate::pack::planner::{Chunk, ChunkPlanner};

/// Pre-order walk of `source`, feeding every directory and regular file to
/// the planner in visit order. The source root itself is never recorded.
/// The first placement failure aborts the walk.
pub fn plan(source: &Path, cap: u64, split_root: &Path) -> Result<Vec<Chunk>> {
    if !source.is_dir() {
        return Err(BalerError::NotADirectory(source.to_path_buf()));
    }
    let mut planner = ChunkPlanner::new(cap, source, split_root);
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_dir() {
            planner.place_dir(entry.path());
        } else if entry.file_type().is_file() {
            let size = entry
                .metadata()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
                .len();
            planner.place_file(entry.path(), size)?;
        }
        // symlinks are skipped
    }
    Ok(planner.finish())
}
