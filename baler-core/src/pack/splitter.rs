use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::util::partname;

/// One contiguous byte range of an oversized file, materialized as a temp
/// file until its chunk is written.
#[derive(Clone, Debug)]
pub struct SplitPart {
    pub index: usize,
    pub path: PathBuf,
    pub len: u64,
}

/// Split `src` (of `size` bytes, known to exceed `cap`) into ordered parts
/// of at most `cap` bytes under `split_root`, mirroring the file's
/// directory relative to `source_root`. The caller owns cleanup of the
/// split area, including partially written parts on error.
pub fn split_file(
    src: &Path,
    size: u64,
    cap: u64,
    source_root: &Path,
    split_root: &Path,
) -> Result<Vec<SplitPart>> {
    let rel = src.strip_prefix(source_root).unwrap_or(src);
    let full_parts = size / cap;
    let tail = size % cap;

    let mut reader = File::open(src)?;
    let mut buf = vec![0u8; 64 * 1024];
    let mut parts = Vec::with_capacity(full_parts as usize + 1);

    for index in 0..full_parts as usize {
        parts.push(write_part(&mut reader, rel, index, cap, split_root, &mut buf)?);
    }
    if tail > 0 {
        parts.push(write_part(
            &mut reader,
            rel,
            full_parts as usize,
            tail,
            split_root,
            &mut buf,
        )?);
    }
    debug!(file = %src.display(), parts = parts.len(), "split");
    Ok(parts)
}

fn write_part(
    reader: &mut File,
    rel: &Path,
    index: usize,
    len: u64,
    split_root: &Path,
    buf: &mut [u8],
) -> Result<SplitPart> {
    let path = split_root.join(partname::part_file_path(rel, index));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = File::create(&path)?;
    let mut left = len;
    while left > 0 {
        let want = buf.len().min(left as usize);
        let n = reader.read(&mut buf[..want])?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "source file shrank during split",
            )
            .into());
        }
        out.write_all(&buf[..n])?;
        left -= n as u64;
    }
    Ok(SplitPart { index, path, len })
}
