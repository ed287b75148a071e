//! Upload Reconciler: folds the upload widget's file list into the draft's
//! photo slot.

use anyhow::{Context, Result};
use productdesk_core::models::{UploadFile, UploadFileList};

use crate::store::FormStore;
use crate::thumbnail::{data_url, sniff_mime};

#[derive(Debug, Clone, Default)]
pub struct UploadReconciler {
    files: UploadFileList,
    persisted_photo: Option<String>,
}

impl UploadReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &UploadFileList {
        &self.files
    }

    pub fn persisted_photo(&self) -> Option<&str> {
        self.persisted_photo.as_deref()
    }

    /// A persisted photo became known. Seeds the list with one entry for it
    /// unless the user already put something there.
    pub fn on_persisted_photo(&mut self, url: &str, store: &mut FormStore) {
        if url.is_empty() {
            return;
        }
        self.persisted_photo = Some(url.to_string());
        if self.files.is_empty() {
            self.on_file_list_change(UploadFileList::single(UploadFile::persisted(url)), store);
        }
    }

    /// Commit a new file list, then recompute the photo.
    pub fn on_file_list_change(&mut self, files: UploadFileList, store: &mut FormStore) {
        if files.len() > 1 {
            tracing::debug!(
                entries = files.len(),
                "Upload list holds several entries; only the newest is used"
            );
        }
        self.files = files;
        self.reconcile(store);
    }

    /// Derive the photo from the committed list. Idempotent.
    ///
    /// An empty list clears the photo only when there is no persisted one;
    /// otherwise the current value is kept.
    pub fn reconcile(&self, store: &mut FormStore) {
        match self.files.newest() {
            Some(file) => store.set_photo(file.thumbnail_ref()),
            None if self.persisted_photo.is_none() => store.set_photo(None),
            None => {}
        }
    }
}

/// Displayable source for previewing an entry. Reading the local file does
/// not touch the draft.
pub async fn preview_source(file: &UploadFile) -> Result<String> {
    if let Some(url) = file.url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(url.to_string());
    }

    match &file.origin {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(data_url(sniff_mime(&bytes), &bytes))
        }
        None => file
            .thumb_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Upload entry {} has nothing to preview", file.uid)),
    }
}
