use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{DataError, Result};

/// Number of leading digits in a controller-written data file name.
const DATA_FILE_DIGITS: usize = 6;

/// True for names the controller gives scan results: six ASCII digits
/// followed by `.dat`, e.g. `000042.dat`.
pub fn is_data_file_name(name: &str) -> bool {
    match name.strip_suffix(".dat") {
        Some(stem) => stem.len() == DATA_FILE_DIGITS && stem.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// List scan data files in `dir`, oldest first.
///
/// Files are ordered by creation time, falling back to modification time
/// where the platform does not record creation. Ties sort by name.
pub fn list_data_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;

    let mut found: Vec<(Option<SystemTime>, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_data_file_name(name) {
            continue;
        }
        let path = entry.path();
        // Follow symlinks; a dangling link is skipped like any non-file.
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(DataError::io(path, e)),
        };
        if !metadata.is_file() {
            continue;
        }
        let stamp = metadata.created().or_else(|_| metadata.modified()).ok();
        found.push((stamp, path));
    }

    found.sort_by(|(ta, pa), (tb, pb)| match ta.cmp(tb) {
        Ordering::Equal => pa.cmp(pb),
        other => other,
    });
    debug!(?dir, count = found.len(), "listed data files");

    Ok(found.into_iter().map(|(_, path)| path).collect())
}
