use std::path::{Path, PathBuf};

/// Literal token separating a base name from a zero-based part index.
pub const PART_MARKER: &str = ".part.";

/// Part name for `file_name` at `index`: the marker and index slot in just
/// before the final extension. `report.pdf` -> `report.part.2.pdf`; names
/// without an extension get the marker appended (`LICENSE` ->
/// `LICENSE.part.0`). A lone leading dot does not count as an extension.
pub fn part_file_name(file_name: &str, index: usize) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            format!(
                "{}{PART_MARKER}{index}{}",
                &file_name[..dot],
                &file_name[dot..]
            )
        }
        _ => format!("{file_name}{PART_MARKER}{index}"),
    }
}

/// `part_file_name` applied to the last component of `path`.
pub fn part_file_path(path: &Path, index: usize) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => path.with_file_name(part_file_name(name, index)),
        None => path.to_path_buf(),
    }
}

/// Inverse of `part_file_name`. The match is anchored: the marker must be
/// followed by one or more digits, and what remains must be empty or a
/// `.`-led extension. Returns `None` for names without a part marker.
pub fn strip_part_name(file_name: &str) -> Option<String> {
    let at = file_name.find(PART_MARKER)?;
    let rest = &file_name[at + PART_MARKER.len()..];
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let tail = &rest[digits..];
    if !tail.is_empty() && !tail.starts_with('.') {
        return None;
    }
    Some(format!("{}{tail}", &file_name[..at]))
}

/// Destination path with any part marker removed from the file name.
pub fn strip_part_path(path: &Path) -> PathBuf {
    match path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(strip_part_name)
    {
        Some(base) => path.with_file_name(base),
        None => path.to_path_buf(),
    }
}
