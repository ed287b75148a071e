use serde::{Deserialize, Serialize, Serializer};

use super::empty_if_null;

/// Read-only snapshot of a persisted product, used to seed the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub slug: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub short_description: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub full_description: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub website: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub video_url: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl ProductData {
    /// Persisted photo URL, ignoring empty strings.
    pub fn persisted_photo(&self) -> Option<&str> {
        self.photo.as_deref().filter(|p| !p.is_empty())
    }
}

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing(ProductData),
}

impl FormMode {
    pub fn snapshot(&self) -> Option<&ProductData> {
        match self {
            FormMode::Adding => None,
            FormMode::Editing(data) => Some(data),
        }
    }

    pub fn is_adding(&self) -> bool {
        matches!(self, FormMode::Adding)
    }
}

/// Route parameters the form was opened under (`/products/{productSlug}/...`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub product_slug: Option<String>,
}

impl RouteContext {
    pub fn for_product(slug: impl Into<String>) -> Self {
        Self {
            product_slug: Some(slug.into()),
        }
    }
}

/// Reference to the product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    /// URL of an image the server already stores.
    Persisted(String),
    /// Thumbnail data reference generated from a file the user just picked.
    Fresh(String),
}

impl PhotoRef {
    pub fn as_str(&self) -> &str {
        match self {
            PhotoRef::Persisted(url) => url,
            PhotoRef::Fresh(data) => data,
        }
    }
}

// Sent as the bare string in the `file` variable.
impl Serialize for PhotoRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The `productInput` variable of the create and update mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub name: String,
    pub short_description: String,
    pub full_description: String,
    pub website: String,
    pub video_url: String,
}

/// One remote write, built once when an operation is triggered and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    Create {
        input: ProductInput,
        file: Option<PhotoRef>,
    },
    Update {
        input: ProductInput,
        file: Option<PhotoRef>,
    },
    Delete {
        slug: String,
    },
}

/// `{status, message, newSlug?}` returned by every product mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_slug: Option<String>,
}
