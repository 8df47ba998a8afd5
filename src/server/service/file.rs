use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::server::error::Error;

/// Recursively collects the `.pdf` drawings under `folder`, sorted by path
///
/// The extension match ignores case. A missing folder yields no drawings.
pub fn find_pdfs_in_folder(folder: &Path) -> Result<Vec<PathBuf>, Error> {
    if !folder.is_dir() {
        return Ok(Vec::new());
    }

    let mut pdfs = Vec::new();
    for entry in WalkDir::new(folder).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            pdfs.push(entry.into_path());
        }
    }
    pdfs.sort();

    Ok(pdfs)
}
