//! Reading and writing `.vec` documents on disk.

use std::fs;
use std::path::{Path, PathBuf};

use scene::{Document, SceneConfig, SceneStore};
use tracing::{info, warn};

use crate::CliError;

/// Extension given to documents created without one.
pub const DOCUMENT_EXTENSION: &str = "vec";

/// `path`, with `.vec` appended when it has no extension.
#[must_use]
pub fn with_default_extension(path: &Path) -> PathBuf {
    let mut out = path.to_path_buf();
    if out.extension().is_none() {
        out.set_extension(DOCUMENT_EXTENSION);
    }
    out
}

/// Read and parse a document.
pub fn read_document(path: &Path) -> Result<Document, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    Document::parse(&text).map_err(|source| CliError::Document { path: path.to_path_buf(), source })
}

/// Open a document as a fresh editing session with empty history.
pub fn open_store(path: &Path, config: SceneConfig) -> Result<SceneStore, CliError> {
    let doc = read_document(path)?;
    let store =
        SceneStore::with_objects(doc.objects, config).map_err(|source| CliError::Scene { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), objects = store.objects().len(), "document opened");
    Ok(store)
}

/// Save the store's objects to `path`.
///
/// The text is written to a sibling temporary file first and renamed into
/// place, so an interrupted save never truncates an existing document. The
/// temporary file is removed when the rename fails.
pub fn save_store(path: &Path, store: &SceneStore) -> Result<(), CliError> {
    let text = store.save_document().map_err(|source| CliError::Scene { path: path.to_path_buf(), source })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, text).map_err(|source| CliError::Write { path: tmp.clone(), source })?;
    if let Err(source) = fs::rename(&tmp, path) {
        if let Err(err) = fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %err, "failed to remove temporary file");
        }
        return Err(CliError::Write { path: path.to_path_buf(), source });
    }
    info!(path = %path.display(), objects = store.objects().len(), "document saved");
    Ok(())
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
