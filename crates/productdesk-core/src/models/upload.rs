use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::product::PhotoRef;

/// Identifier given to the entry seeded from a persisted photo.
pub const PERSISTED_ENTRY_UID: &str = "-1";

/// One entry of the upload widget's file list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    /// URL of an image already stored by the server.
    #[serde(default)]
    pub url: Option<String>,
    /// Locally generated thumbnail data reference.
    #[serde(default)]
    pub thumb_url: Option<String>,
    /// Local file the entry was created from, used for previews.
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

impl UploadFile {
    pub fn persisted(url: impl Into<String>) -> Self {
        Self {
            uid: PERSISTED_ENTRY_UID.to_string(),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// The reference this entry contributes to the draft's photo: the fresh
    /// thumbnail if one was generated, otherwise the persisted URL.
    pub fn thumbnail_ref(&self) -> Option<PhotoRef> {
        if let Some(thumb) = self.thumb_url.as_deref().filter(|t| !t.is_empty()) {
            return Some(PhotoRef::Fresh(thumb.to_string()));
        }
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| PhotoRef::Persisted(u.to_string()))
    }
}

/// The widget's file list. Only the newest entry is ever considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFileList(Vec<UploadFile>);

impl UploadFileList {
    pub fn new(files: Vec<UploadFile>) -> Self {
        Self(files)
    }

    pub fn single(file: UploadFile) -> Self {
        Self(vec![file])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn newest(&self) -> Option<&UploadFile> {
        self.0.last()
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.0
    }
}

impl From<Vec<UploadFile>> for UploadFileList {
    fn from(files: Vec<UploadFile>) -> Self {
        Self(files)
    }
}
