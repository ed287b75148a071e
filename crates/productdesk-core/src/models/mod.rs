pub mod portfolio;
pub mod product;
pub mod upload;

pub use portfolio::{
    Attachment, Initiative, Person, PersonProfile, ProductReview, ReviewBundle, ReviewDetail,
    ReviewProduct, Task,
};
pub use product::{
    FormMode, PhotoRef, ProductData, ProductInput, RouteContext, SubmissionRequest,
    WriteResponse,
};
pub use upload::{UploadFile, UploadFileList};

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable string, mapping `null` to the empty string.
pub(crate) fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a nullable list, mapping `null` to an empty list.
pub(crate) fn empty_vec_if_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
