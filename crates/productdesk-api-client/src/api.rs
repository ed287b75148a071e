//! Product and portfolio operations for the API client.

use crate::ApiClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use productdesk_core::models::{
    PersonProfile, PhotoRef, ProductData, ProductInput, ReviewBundle, Task, WriteResponse,
};
use productdesk_core::{PortfolioApi, ProductApi};
use serde::Deserialize;
use serde_json::json;

pub const CREATE_PRODUCT: &str = r#"
mutation CreateProduct($productInput: ProductInput!, $file: Upload) {
  createProduct(productInput: $productInput, file: $file) {
    status
    message
  }
}
"#;

pub const UPDATE_PRODUCT: &str = r#"
mutation UpdateProduct($productInput: ProductInput!, $file: Upload) {
  updateProduct(productInput: $productInput, file: $file) {
    status
    message
    newSlug
  }
}
"#;

pub const DELETE_PRODUCT: &str = r#"
mutation DeleteProduct($slug: String!) {
  deleteProduct(slug: $slug) {
    status
    message
  }
}
"#;

pub const GET_PRODUCT: &str = r#"
query GetProduct($slug: String!) {
  product(slug: $slug) {
    slug
    name
    shortDescription
    fullDescription
    website
    videoUrl
    photo
  }
}
"#;

pub const GET_PERSON_PROFILE: &str = r#"
query GetPersonProfile($personSlug: String!) {
  personProfile(personSlug: $personSlug) {
    person {
      slug
      fullName
      avatar
    }
  }
}
"#;

pub const GET_REVIEW_BY_ID: &str = r#"
query GetReviewById($reviewId: Int!, $personSlug: String!) {
  review(reviewId: $reviewId, personSlug: $personSlug) {
    review {
      product {
        id
        name
        shortDescription
        videoUrl
        initiatives { id name }
        attachment { id name path }
      }
    }
    productReviews {
      id
      score
      text
      createdBy { slug fullName avatar }
    }
  }
}
"#;

pub const GET_TASKS_BY_PRODUCT: &str = r#"
query GetTasksByProduct($productId: String!, $status: Int) {
  tasks(productId: $productId, status: $status) {
    id
    title
    description
    createdAt
    detailUrl
  }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductData {
    create_product: Option<WriteResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProductData {
    update_product: Option<WriteResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProductData {
    delete_product: Option<WriteResponse>,
}

#[derive(Debug, Deserialize)]
struct ProductQueryData {
    product: Option<ProductData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonProfileData {
    person_profile: Option<PersonProfile>,
}

#[derive(Debug, Deserialize)]
struct ReviewData {
    review: Option<ReviewBundle>,
}

#[derive(Debug, Deserialize)]
struct TasksData {
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

#[async_trait]
impl ProductApi for ApiClient {
    #[tracing::instrument(skip(self, input, file), fields(name = %input.name, has_file = file.is_some()))]
    async fn create_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> Result<WriteResponse> {
        let data: CreateProductData = self
            .execute(
                CREATE_PRODUCT,
                &json!({ "productInput": input, "file": file }),
            )
            .await
            .context("createProduct failed")?;
        Ok(data.create_product.unwrap_or_default())
    }

    #[tracing::instrument(skip(self, input, file), fields(slug = ?input.slug, has_file = file.is_some()))]
    async fn update_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> Result<WriteResponse> {
        let data: UpdateProductData = self
            .execute(
                UPDATE_PRODUCT,
                &json!({ "productInput": input, "file": file }),
            )
            .await
            .context("updateProduct failed")?;
        Ok(data.update_product.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_product(&self, slug: &str) -> Result<WriteResponse> {
        let data: DeleteProductData = self
            .execute(DELETE_PRODUCT, &json!({ "slug": slug }))
            .await
            .context("deleteProduct failed")?;
        Ok(data.delete_product.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    async fn get_product(&self, slug: &str) -> Result<Option<ProductData>> {
        let data: ProductQueryData = self
            .execute(GET_PRODUCT, &json!({ "slug": slug }))
            .await
            .with_context(|| format!("Failed to load product {}", slug))?;
        Ok(data.product)
    }
}

#[async_trait]
impl PortfolioApi for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn person_profile(&self, person_slug: &str) -> Result<Option<PersonProfile>> {
        let data: PersonProfileData = self
            .execute(GET_PERSON_PROFILE, &json!({ "personSlug": person_slug }))
            .await
            .context("Failed to load person profile")?;
        Ok(data.person_profile)
    }

    #[tracing::instrument(skip(self))]
    async fn review(&self, review_id: i64, person_slug: &str) -> Result<Option<ReviewBundle>> {
        let data: ReviewData = self
            .execute(
                GET_REVIEW_BY_ID,
                &json!({ "reviewId": review_id, "personSlug": person_slug }),
            )
            .await
            .context("Failed to load review")?;
        Ok(data.review)
    }

    #[tracing::instrument(skip(self))]
    async fn tasks_by_product(&self, product_id: &str, status: i32) -> Result<Vec<Task>> {
        let data: TasksData = self
            .execute(
                GET_TASKS_BY_PRODUCT,
                &json!({ "productId": product_id, "status": status }),
            )
            .await
            .context("Failed to load tasks")?;
        Ok(data.tasks.unwrap_or_default())
    }
}
