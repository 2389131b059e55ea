// Folder scanning: which files in a directory can be uploaded as targets.

use crate::error::{VwsError, VwsResult};
use std::fs;
use std::path::Path;

/// Only this extension is accepted, compared case-sensitively.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Result of scanning a folder. Both lists are sorted by file name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FolderScan {
    pub images: Vec<String>,
    pub skipped: Vec<String>,
}

/// Regular files directly inside `dir`, sorted by name. Subdirectories are
/// not entered.
pub fn list_files(dir: &Path) -> VwsResult<Vec<String>> {
    let io_err = |source| VwsError::File {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        // follows symlinks, like an `isfile` check would
        let is_file = fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => tracing::warn!(?name, "skipping file with non UTF-8 name"),
        }
    }
    files.sort();
    Ok(files)
}

/// `a.jpg` yes; `a.JPG`, `a.jpeg`, `jpg` no.
pub fn is_eligible(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext == IMAGE_EXTENSION)
        .unwrap_or(false)
}

pub fn scan_folder(dir: &Path) -> VwsResult<FolderScan> {
    let (images, skipped): (Vec<String>, Vec<String>) = list_files(dir)?
        .into_iter()
        .partition(|name| is_eligible(name));
    Ok(FolderScan { images, skipped })
}

pub fn list_image_files(dir: &Path) -> VwsResult<Vec<String>> {
    Ok(scan_folder(dir)?.images)
}
