//! Submission Controller: create, update and delete.
//!
//! Every operation goes `Idle -> Validating -> (Idle | Busy)`, then
//! `Busy -> Navigating -> Succeeded` or `Busy -> Idle` on failure. The busy
//! flag is raised once per accepted attempt and lowered only on failure;
//! after a success the form is expected to be torn down by the navigation.
//!
//! The controller does not look at the busy flag before issuing a call. Guarding
//! against repeated triggers is the job of [`crate::trigger::TriggerBridge`].

use std::sync::Arc;
use std::time::Duration;

use productdesk_core::models::{RouteContext, SubmissionRequest, WriteResponse};
use productdesk_core::{
    ClientConfig, LogLevel, Navigator, Notifier, ProductApi, Severity, SubmitError,
};

use crate::store::FormStore;

pub const VALIDATION_MESSAGE: &str = "Please fill the form fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn of(request: &SubmissionRequest) -> Self {
        match request {
            SubmissionRequest::Create { .. } => Operation::Create,
            SubmissionRequest::Update { .. } => Operation::Update,
            SubmissionRequest::Delete { .. } => Operation::Delete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Shown when the remote call itself fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Create => "Error with product creation",
            Operation::Update => "Error with product updating",
            Operation::Delete => "Error with product deletion",
        }
    }

    /// Paths to visit, in order, after a successful write.
    pub fn destinations(&self, home: &str, response: &WriteResponse) -> Vec<String> {
        match self {
            Operation::Create | Operation::Delete => vec![home.to_string()],
            Operation::Update => {
                let next = match response.new_slug.as_deref().filter(|s| !s.is_empty()) {
                    Some(slug) => format!("/products/{}/", slug),
                    None => home.to_string(),
                };
                vec![home.to_string(), next]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating(Operation),
    Busy(Operation),
    Navigating(Operation),
    Succeeded(Operation),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Refused before any remote call.
    Rejected {
        operation: Operation,
        error: SubmitError,
    },
    /// The remote write failed or was refused by the server.
    Failed {
        operation: Operation,
        error: SubmitError,
    },
    /// Written, navigated, notified.
    Succeeded {
        operation: Operation,
        destination: String,
        message: String,
    },
    /// Written, but the router refused to move. No notification was shown.
    NavigationFailed {
        operation: Operation,
        error: anyhow::Error,
    },
}

impl SubmitOutcome {
    pub fn operation(&self) -> Operation {
        match self {
            SubmitOutcome::Rejected { operation, .. }
            | SubmitOutcome::Failed { operation, .. }
            | SubmitOutcome::Succeeded { operation, .. }
            | SubmitOutcome::NavigationFailed { operation, .. } => *operation,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded { .. })
    }
}

pub struct SubmissionController {
    api: Arc<dyn ProductApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    home: String,
    timeout: Option<Duration>,
    busy: bool,
    phase: Phase,
}

impl SubmissionController {
    pub fn new(
        api: Arc<dyn ProductApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            navigator,
            notifier,
            home: config.home_path.clone(),
            timeout: config.submit_timeout,
            busy: false,
            phase: Phase::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[tracing::instrument(skip_all, fields(operation = "create"))]
    pub async fn submit_create(&mut self, store: &FormStore) -> SubmitOutcome {
        self.phase = Phase::Validating(Operation::Create);
        if let Err(error) = validate(store) {
            return self.reject(Operation::Create, error);
        }
        let request = SubmissionRequest::Create {
            input: store.to_input(None),
            file: store.photo().cloned(),
        };
        self.run(request).await
    }

    #[tracing::instrument(skip(self, store), fields(operation = "update"))]
    pub async fn submit_update(&mut self, store: &FormStore, slug: &str) -> SubmitOutcome {
        self.phase = Phase::Validating(Operation::Update);
        if let Err(error) = validate(store) {
            return self.reject(Operation::Update, error);
        }
        let request = SubmissionRequest::Update {
            input: store.to_input(Some(slug.to_string())),
            file: store.photo().cloned(),
        };
        self.run(request).await
    }

    /// Acts on the route's slug only; the draft is not consulted.
    #[tracing::instrument(skip_all, fields(operation = "delete", slug = ?route.product_slug))]
    pub async fn submit_delete(&mut self, route: &RouteContext) -> SubmitOutcome {
        self.phase = Phase::Validating(Operation::Delete);
        let slug = match route.product_slug.as_deref().filter(|s| !s.is_empty()) {
            Some(slug) => slug.to_string(),
            None => return self.reject(Operation::Delete, SubmitError::MissingSlug),
        };
        self.run(SubmissionRequest::Delete { slug }).await
    }

    fn reject(&mut self, operation: Operation, error: SubmitError) -> SubmitOutcome {
        log_failure(operation, &error);
        self.notifier.notify(
            Severity::Error,
            &error.notification_text(operation.failure_message()),
        );
        self.phase = Phase::Idle;
        SubmitOutcome::Rejected { operation, error }
    }

    async fn run(&mut self, request: SubmissionRequest) -> SubmitOutcome {
        let operation = Operation::of(&request);
        self.busy = true;
        self.phase = Phase::Busy(operation);

        match self.dispatch(&request).await {
            Ok(response) if response.status => self.complete(operation, response).await,
            Ok(response) => self.fail(operation, SubmitError::Rejected(response.message)),
            Err(error) => self.fail(operation, error),
        }
    }

    async fn dispatch(&self, request: &SubmissionRequest) -> Result<WriteResponse, SubmitError> {
        let call = async {
            match request {
                SubmissionRequest::Create { input, file } => {
                    self.api.create_product(input, file.as_ref()).await
                }
                SubmissionRequest::Update { input, file } => {
                    self.api.update_product(input, file.as_ref()).await
                }
                SubmissionRequest::Delete { slug } => self.api.delete_product(slug).await,
            }
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| SubmitError::TimedOut(limit))?
                .map_err(SubmitError::transport),
            None => call.await.map_err(SubmitError::transport),
        }
    }

    fn fail(&mut self, operation: Operation, error: SubmitError) -> SubmitOutcome {
        log_failure(operation, &error);
        self.notifier.notify(
            Severity::Error,
            &error.notification_text(operation.failure_message()),
        );
        self.busy = false;
        self.phase = Phase::Idle;
        SubmitOutcome::Failed { operation, error }
    }

    async fn complete(&mut self, operation: Operation, response: WriteResponse) -> SubmitOutcome {
        self.phase = Phase::Navigating(operation);

        let destinations = operation.destinations(&self.home, &response);
        for destination in &destinations {
            if let Err(error) = self.navigator.push(destination).await {
                tracing::error!(
                    operation = operation.as_str(),
                    destination = %destination,
                    error = %error,
                    "Navigation after successful write failed"
                );
                return SubmitOutcome::NavigationFailed { operation, error };
            }
        }

        self.notifier.notify(Severity::Success, &response.message);
        self.phase = Phase::Succeeded(operation);

        let destination = destinations
            .last()
            .cloned()
            .unwrap_or_else(|| self.home.clone());
        tracing::info!(
            operation = operation.as_str(),
            destination = %destination,
            "Product write succeeded"
        );

        SubmitOutcome::Succeeded {
            operation,
            destination,
            message: response.message,
        }
    }
}

fn validate(store: &FormStore) -> Result<(), SubmitError> {
    let missing = store.missing_required();
    if missing.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        missing = ?missing.iter().map(|f| f.label()).collect::<Vec<_>>(),
        "Required fields are empty"
    );
    Err(SubmitError::Validation(VALIDATION_MESSAGE.to_string()))
}

fn log_failure(operation: Operation, error: &SubmitError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(operation = operation.as_str(), error = %error, "Submission refused")
        }
        LogLevel::Warn => {
            tracing::warn!(operation = operation.as_str(), error = %error, "Submission failed")
        }
        LogLevel::Error => {
            tracing::error!(operation = operation.as_str(), error = %error, "Submission failed")
        }
    }
}
