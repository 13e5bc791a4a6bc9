use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::Result;
use crate::pack::splitter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One discovered file or directory, with its archive entry name fixed at
/// planning time. Directory names carry a trailing `/`.
#[derive(Clone, Debug)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: EntryKind,
}

/// Ordered entry group destined for one artifact.
#[derive(Clone, Debug, Default)]
pub struct Chunk {
    pub entries: Vec<TreeEntry>,
    pub size: u64,
}

pub struct ChunkPlanner {
    cap: u64,
    source_root: PathBuf,
    split_root: PathBuf,
    chunks: Vec<Chunk>,
    current: Chunk,
}

impl ChunkPlanner {
    pub fn new(cap: u64, source_root: &Path, split_root: &Path) -> Self {
        Self {
            cap,
            source_root: source_root.to_path_buf(),
            split_root: split_root.to_path_buf(),
            chunks: Vec::new(),
            current: Chunk::default(),
        }
    }

    /// Directories are zero-size markers, appended to the open chunk
    /// unconditionally.
    pub fn place_dir(&mut self, path: &Path) {
        let name = format!("{}/", entry_name(path, &self.source_root));
        self.append(TreeEntry {
            path: path.to_path_buf(),
            name,
            size: 0,
            kind: EntryKind::Dir,
        });
    }

    /// Whole files are classified against the cap first; only an oversized
    /// file is split, and its parts run through ordinary placement in index
    /// order. A part is at most `cap` bytes by construction, so it can
    /// never split again.
    pub fn place_file(&mut self, path: &Path, size: u64) -> Result<()> {
        if self.cap > 0 && size > self.cap {
            let parts =
                splitter::split_file(path, size, self.cap, &self.source_root, &self.split_root)?;
            for part in parts {
                let name = entry_name(&part.path, &self.split_root);
                self.place(TreeEntry {
                    path: part.path,
                    name,
                    size: part.len,
                    kind: EntryKind::File,
                });
            }
            return Ok(());
        }
        let name = entry_name(path, &self.source_root);
        self.place(TreeEntry {
            path: path.to_path_buf(),
            name,
            size,
            kind: EntryKind::File,
        });
        Ok(())
    }

    /// Capped placement: an entry that would push the open chunk past the
    /// cap closes it and starts the next one. An exact fit stays put.
    fn place(&mut self, entry: TreeEntry) {
        if self.cap > 0 && entry.size + self.current.size > self.cap {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.append(entry);
    }

    fn append(&mut self, entry: TreeEntry) {
        trace!(entry = %entry.name, chunk = self.chunks.len(), "planned");
        self.current.size += entry.size;
        self.current.entries.push(entry);
    }

    /// Close the open chunk and return the ordered chunk list.
    pub fn finish(mut self) -> Vec<Chunk> {
        if !self.current.entries.is_empty() {
            self.chunks.push(self.current);
        }
        self.chunks
    }
}

/// Archive entry name for `path` under `root`: relative, `/`-separated.
fn entry_name(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
