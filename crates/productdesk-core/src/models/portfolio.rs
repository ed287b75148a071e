use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{empty_if_null, empty_vec_if_null};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub slug: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub full_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonProfile {
    #[serde(default)]
    pub person: Person,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_by: Person,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub id: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProduct {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub id: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub short_description: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub video_url: String,
    #[serde(default, deserialize_with = "empty_vec_if_null")]
    pub initiatives: Vec<Initiative>,
    #[serde(default, deserialize_with = "empty_vec_if_null")]
    pub attachment: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewDetail {
    #[serde(default)]
    pub product: ReviewProduct,
}

/// Result of the review-by-id query: the reviewed portfolio item and all
/// reviews written about its product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBundle {
    #[serde(default)]
    pub review: ReviewDetail,
    #[serde(default, deserialize_with = "empty_vec_if_null")]
    pub product_reviews: Vec<ProductReview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub title: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub detail_url: Option<String>,
}
