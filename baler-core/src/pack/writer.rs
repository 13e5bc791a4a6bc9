use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, error, info};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{BalerError, Result};
use crate::format::Format;
use crate::limit;
use crate::pack::planner::{Chunk, EntryKind};
use crate::pack::walker;
use crate::util::partname;

/// Fixed writer pool; artifact fan-out never scales with chunk count.
const WRITER_THREADS: usize = 20;

const TEMP_PREFIX: &str = "baler-";

/// Compress the contents of `source` into size-capped zip artifacts under
/// `dest`. A single resulting chunk is written as `<name>.zip`; multiple
/// chunks fan out in parallel as `<name>.part.<n>.zip`.
pub fn compress(source: &Path, dest: &Path, max_size_mib: u64) -> Result<()> {
    ensure_dir(source)?;
    ensure_dir(dest)?;
    // Resolve `.`-style invocations to a real directory name.
    let source = source.canonicalize()?;
    let source_name = source
        .file_name()
        .ok_or_else(|| BalerError::NotADirectory(source.clone()))?;

    let cap_mib = limit::clamp_to_memory(max_size_mib);
    let cap = cap_mib.saturating_mul(limit::BYTES_PER_MIB);
    info!(
        source = %source.display(),
        dest = %dest.display(),
        cap_mib,
        "compressing"
    );

    // Split parts live here until every writer is done.
    let tmp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
    let split_root = tmp.path().join(source_name);

    let chunks = walker::plan(&source, cap, &split_root)?;
    if chunks.is_empty() {
        info!("nothing to archive");
        tmp.close()?;
        return Ok(());
    }

    let base = dest.join(format!(
        "{}.{}",
        source_name.to_string_lossy(),
        Format::Zip.extension()
    ));

    if chunks.len() == 1 {
        write_chunk(&chunks[0], &base)?;
    } else {
        write_artifacts(&chunks, &base)?;
    }

    tmp.close()?;
    info!("compression finished");
    Ok(())
}

/// One writer task per chunk on a fixed pool. A failing writer is recorded
/// and never cancels its siblings; failures are aggregated once the whole
/// fan-out has returned.
fn write_artifacts(chunks: &[Chunk], base: &Path) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WRITER_THREADS)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let failures: Vec<String> = pool.install(|| {
        chunks
            .par_iter()
            .enumerate()
            .filter_map(|(index, chunk)| {
                let artifact = partname::part_file_path(base, index);
                match write_chunk(chunk, &artifact) {
                    Ok(()) => None,
                    Err(e) => {
                        error!(artifact = %artifact.display(), %e, "artifact write failed");
                        Some(format!("{}: {e}", artifact.display()))
                    }
                }
            })
            .collect()
    });

    if failures.is_empty() {
        Ok(())
    } else {
        Err(BalerError::ArtifactWrites(failures))
    }
}

/// Serialize one chunk into one artifact, one entry per planned item, in
/// planning order. Directory entries are zero-length; file bytes stream
/// through a bounded buffer.
fn write_chunk(chunk: &Chunk, artifact: &Path) -> Result<()> {
    let file = File::create(artifact)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    let mut buf = vec![0u8; 64 * 1024];
    for entry in &chunk.entries {
        match entry.kind {
            EntryKind::Dir => {
                zip.add_directory(entry.name.as_str(), options)?;
                debug!(entry = %entry.name, "wrote directory");
            }
            EntryKind::File => {
                zip.start_file(entry.name.as_str(), options)?;
                let mut src = File::open(&entry.path)?;
                loop {
                    let n = src.read(&mut buf)?;
                    if n == 0 {
                        break;
                    }
                    zip.write_all(&buf[..n])?;
                }
                debug!(entry = %entry.name, "wrote file");
            }
        }
    }
    let mut inner = zip.finish()?;
    inner.flush()?;
    Ok(())
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(BalerError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
