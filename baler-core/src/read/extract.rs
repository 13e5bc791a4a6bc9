use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::read::ZipArchive;

use crate::error::{BalerError, Result};
use crate::format::Format;
use crate::pack::writer::ensure_dir;
use crate::util::partname;

/// Rebuild the tree archived under `source` into `dest`. Artifacts replay
/// in lexicographic order; within one artifact, entries replay in stored
/// order. Split parts append onto their part-stripped base file, which
/// reconstructs the original byte stream.
pub fn decompress(source: &Path, dest: &Path) -> Result<()> {
    ensure_dir(source)?;
    ensure_dir(dest)?;

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(Format::Zip.extension())
        {
            artifacts.push(path);
        }
    }
    artifacts.sort();
    if artifacts.is_empty() {
        return Err(BalerError::EmptyInput(source.to_path_buf()));
    }
    info!(
        source = %source.display(),
        dest = %dest.display(),
        artifacts = artifacts.len(),
        "decompressing"
    );

    let mut buf = vec![0u8; 64 * 1024];
    for artifact in &artifacts {
        replay_artifact(artifact, dest, &mut buf)?;
    }
    info!("decompression finished");
    Ok(())
}

/// Replay one artifact: directory entries are created idempotently with
/// intermediates; file entries append (create-if-absent) onto the
/// part-stripped destination path.
fn replay_artifact(artifact: &Path, dest: &Path, buf: &mut [u8]) -> Result<()> {
    debug!(artifact = %artifact.display(), "replaying");
    let mut archive = ZipArchive::new(BufReader::new(File::open(artifact)?))?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let target = safe_join(dest, entry.name())?;
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        let target = partname::strip_part_path(&target);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = OpenOptions::new().create(true).append(true).open(&target)?;
        loop {
            let n = entry.read(buf)?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])?;
        }
        debug!(entry = %target.display(), "restored");
    }
    Ok(())
}

fn safe_join(root: &Path, rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);
    if p.is_absolute() || rel.contains("../") || rel.contains("..\\") {
        return Err(
            std::io::Error::new(std::io::ErrorKind::Other, format!("unsafe path: {rel}")).into(),
        );
    }
    Ok(root.join(p))
}
