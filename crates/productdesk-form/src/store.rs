//! Form State Store: one slot per draft field plus the derived photo.
//!
//! Setters are the only mutation path. Nothing is validated on write;
//! required fields are checked when a submission starts.

use productdesk_core::models::{FormMode, PhotoRef, ProductInput};

/// The short description input stops accepting characters past this length.
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    ShortDescription,
    FullDescription,
    Website,
    VideoUrl,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::ShortDescription,
        Field::FullDescription,
        Field::Website,
        Field::VideoUrl,
    ];

    pub fn is_required(&self) -> bool {
        matches!(self, Field::Name | Field::ShortDescription | Field::Website)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Product name",
            Field::ShortDescription => "Short description",
            Field::FullDescription => "Full description",
            Field::Website => "Website url",
            Field::VideoUrl => "Video url",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStore {
    name: String,
    short_description: String,
    full_description: String,
    website: String,
    video_url: String,
    photo: Option<PhotoRef>,
}

impl FormStore {
    /// Empty when adding, copied from the snapshot when editing.
    pub fn seeded(mode: &FormMode) -> Self {
        match mode.snapshot() {
            None => Self::default(),
            Some(data) => Self {
                name: data.name.clone(),
                short_description: data.short_description.clone(),
                full_description: data.full_description.clone(),
                website: data.website.clone(),
                video_url: data.video_url.clone(),
                photo: data
                    .persisted_photo()
                    .map(|url| PhotoRef::Persisted(url.to_string())),
            },
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::ShortDescription => &self.short_description,
            Field::FullDescription => &self.full_description,
            Field::Website => &self.website,
            Field::VideoUrl => &self.video_url,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::ShortDescription => {
                self.short_description = if value.chars().count() > SHORT_DESCRIPTION_MAX_CHARS {
                    value.chars().take(SHORT_DESCRIPTION_MAX_CHARS).collect()
                } else {
                    value
                }
            }
            Field::FullDescription => self.full_description = value,
            Field::Website => self.website = value,
            Field::VideoUrl => self.video_url = value,
        }
    }

    /// Character count shown under the short description input.
    pub fn short_description_count(&self) -> usize {
        self.short_description.chars().count()
    }

    pub fn photo(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }

    /// Written only by the upload reconciler.
    pub(crate) fn set_photo(&mut self, photo: Option<PhotoRef>) {
        self.photo = photo;
    }

    pub fn missing_required(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
            .collect()
    }

    pub fn to_input(&self, slug: Option<String>) -> ProductInput {
        ProductInput {
            slug,
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            full_description: self.full_description.clone(),
            website: self.website.clone(),
            video_url: self.video_url.clone(),
        }
    }
}
