//! Collaborator traits
//!
//! The form depends on the remote API, the router and the notification
//! surface only through these traits. The API client and the CLI implement
//! them; tests substitute recording fakes.

use async_trait::async_trait;

use crate::models::{
    PersonProfile, PhotoRef, ProductData, ProductInput, ReviewBundle, Task, WriteResponse,
};

/// Remote product operations.
///
/// An `Err` means the call itself failed (network, protocol). A well-formed
/// answer, including one with `status: false`, is always `Ok`.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn create_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> anyhow::Result<WriteResponse>;

    async fn update_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> anyhow::Result<WriteResponse>;

    async fn delete_product(&self, slug: &str) -> anyhow::Result<WriteResponse>;

    /// Snapshot used to seed the edit form. `None` if the product does not exist.
    async fn get_product(&self, slug: &str) -> anyhow::Result<Option<ProductData>>;
}

/// Read-only queries behind the portfolio page.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn person_profile(&self, person_slug: &str) -> anyhow::Result<Option<PersonProfile>>;

    async fn review(
        &self,
        review_id: i64,
        person_slug: &str,
    ) -> anyhow::Result<Option<ReviewBundle>>;

    async fn tasks_by_product(&self, product_id: &str, status: i32) -> anyhow::Result<Vec<Task>>;
}

/// Router. `push` resolves once the destination has been reached.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, path: &str) -> anyhow::Result<()>;

    async fn back(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}
