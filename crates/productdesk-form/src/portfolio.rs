//! Portfolio item view model: the product under review, reviews filtered by
//! direction, and the table of tasks done on the product.

use std::str::FromStr;

use anyhow::{Context, Result};
use productdesk_core::models::{PersonProfile, ProductReview, ReviewBundle, Task};
use productdesk_core::PortfolioApi;
use serde::Serialize;

/// Task status the page lists ("done").
pub const DONE_TASK_STATUS: i32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    #[default]
    Received,
    Given,
}

impl FromStr for ReviewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "received" => Ok(ReviewMode::Received),
            "given" => Ok(ReviewMode::Given),
            other => Err(anyhow::anyhow!(
                "Invalid review mode '{}'. Must be: received or given",
                other
            )),
        }
    }
}

/// `given` keeps reviews written by the profile item's owner, `received` the rest.
pub fn filter_reviews<'a>(
    reviews: &'a [ProductReview],
    mode: ReviewMode,
    profile_item_id: &str,
) -> Vec<&'a ProductReview> {
    reviews
        .iter()
        .filter(|review| {
            let authored = review.created_by.slug == profile_item_id;
            match mode {
                ReviewMode::Given => authored,
                ReviewMode::Received => !authored,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub key: String,
    pub task: Task,
    pub description: String,
}

pub fn task_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            key: format!("task-{}", index),
            task: task.clone(),
            description: task.description.clone(),
        })
        .collect()
}

pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoriesSection {
    pub author_first_name: String,
    pub rows: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioView {
    pub product: Link,
    pub initiative: Option<Link>,
    pub summary: String,
    pub has_attachments: bool,
    pub video_url: String,
    pub mode: ReviewMode,
    pub reviews: Vec<ProductReview>,
    /// Present only when both the person and the review loaded.
    pub stories: Option<StoriesSection>,
}

/// Raw results of the three portfolio queries. A query that failed is `None`.
#[derive(Debug, Clone, Default)]
pub struct PortfolioData {
    pub profile_item_id: String,
    pub person: Option<PersonProfile>,
    pub review: Option<ReviewBundle>,
    pub tasks: Vec<Task>,
}

impl PortfolioData {
    pub fn view(&self, mode: ReviewMode) -> PortfolioView {
        let bundle = self.review.clone().unwrap_or_default();
        let product = &bundle.review.product;

        let initiative = product.initiatives.first().map(|initiative| Link {
            label: initiative.name.clone(),
            href: format!("/products/{}/initiatives/{}", product.id, initiative.id),
        });

        let reviews = filter_reviews(&bundle.product_reviews, mode, &self.profile_item_id)
            .into_iter()
            .cloned()
            .collect();

        let stories = match (&self.person, &self.review) {
            (Some(person), Some(_)) => Some(StoriesSection {
                author_first_name: first_name(&person.person.full_name).to_string(),
                rows: task_rows(&self.tasks),
            }),
            _ => None,
        };

        PortfolioView {
            product: Link {
                label: product.name.clone(),
                href: format!("/products/{}/summary", product.id),
            },
            initiative,
            summary: product.short_description.clone(),
            has_attachments: !product.attachment.is_empty(),
            video_url: product.video_url.clone(),
            mode,
            reviews,
            stories,
        }
    }
}

/// Run the person, review and task queries concurrently. Individual query
/// failures, including a non-numeric item id for the review, are logged and
/// leave their section empty.
#[tracing::instrument(skip(api))]
pub async fn load_portfolio(
    api: &dyn PortfolioApi,
    person_slug: &str,
    profile_item_id: &str,
) -> PortfolioData {
    let review_query = async {
        let review_id: i64 = profile_item_id
            .trim()
            .parse()
            .with_context(|| format!("Invalid profile item id: {}", profile_item_id))?;
        api.review(review_id, person_slug).await
    };

    let (person, review, tasks) = tokio::join!(
        api.person_profile(person_slug),
        review_query,
        api.tasks_by_product(profile_item_id, DONE_TASK_STATUS),
    );

    let person = person
        .map_err(|e| tracing::warn!(error = %e, "Person profile query failed"))
        .ok()
        .flatten();
    let review = review
        .map_err(|e| tracing::warn!(error = %e, "Review query failed"))
        .ok()
        .flatten();
    let tasks = tasks
        .map_err(|e| tracing::warn!(error = %e, "Tasks query failed"))
        .unwrap_or_default();

    PortfolioData {
        profile_item_id: profile_item_id.to_string(),
        person,
        review,
        tasks,
    }
}
