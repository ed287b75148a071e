//! The product form: store, upload reconciler, submission controller and
//! trigger bridge owned by one instance.

use std::sync::Arc;

use productdesk_core::models::{FormMode, RouteContext, UploadFileList};
use productdesk_core::{ClientConfig, Navigator, Notifier, ProductApi};

use crate::runtime::{FormEvent, FormSnapshot};
use crate::store::{Field, FormStore};
use crate::submission::{Phase, SubmissionController, SubmitOutcome};
use crate::trigger::{FormCommand, TriggerBridge};
use crate::upload::UploadReconciler;

/// External collaborators of a form.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn ProductApi>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct ProductForm {
    mode: FormMode,
    route: RouteContext,
    store: FormStore,
    uploads: UploadReconciler,
    controller: SubmissionController,
    bridge: TriggerBridge,
    navigator: Arc<dyn Navigator>,
}

impl ProductForm {
    pub fn new(
        mode: FormMode,
        route: RouteContext,
        collaborators: Collaborators,
        config: &ClientConfig,
    ) -> Self {
        let mut store = FormStore::seeded(&mode);
        let mut uploads = UploadReconciler::new();
        if let Some(url) = mode.snapshot().and_then(|data| data.persisted_photo()) {
            uploads.on_persisted_photo(url, &mut store);
        }

        let controller = SubmissionController::new(
            collaborators.api,
            collaborators.navigator.clone(),
            collaborators.notifier,
            config,
        );

        Self {
            mode,
            route,
            store,
            uploads,
            controller,
            bridge: TriggerBridge::new(),
            navigator: collaborators.navigator,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn files(&self) -> &UploadFileList {
        self.uploads.files()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            draft: self.store.clone(),
            files: self.uploads.files().clone(),
            busy: self.is_busy(),
            phase: self.phase(),
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.store.set(field, value);
    }

    pub fn on_file_list_change(&mut self, files: impl Into<UploadFileList>) {
        self.uploads.on_file_list_change(files.into(), &mut self.store);
    }

    pub fn on_persisted_photo(&mut self, url: &str) {
        self.uploads.on_persisted_photo(url, &mut self.store);
    }

    pub async fn submit_create(&mut self) -> SubmitOutcome {
        self.controller.submit_create(&self.store).await
    }

    /// Updates the product the form was opened for.
    pub async fn submit_update(&mut self) -> SubmitOutcome {
        let slug = self
            .mode
            .snapshot()
            .map(|data| data.slug.clone())
            .unwrap_or_default();
        self.controller.submit_update(&self.store, &slug).await
    }

    pub async fn submit_delete(&mut self) -> SubmitOutcome {
        self.controller.submit_delete(&self.route).await
    }

    pub async fn observe_update_count(&mut self, count: u64) -> Option<SubmitOutcome> {
        match self.bridge.observe_update(count) {
            Some(command) => self.execute(command).await,
            None => None,
        }
    }

    pub async fn observe_delete_count(&mut self, count: u64) -> Option<SubmitOutcome> {
        match self.bridge.observe_delete(count) {
            Some(command) => self.execute(command).await,
            None => None,
        }
    }

    pub async fn execute(&mut self, command: FormCommand) -> Option<SubmitOutcome> {
        match command {
            FormCommand::Create => Some(self.submit_create().await),
            FormCommand::Update => Some(self.submit_update().await),
            FormCommand::Delete => Some(self.submit_delete().await),
            FormCommand::Back => {
                if let Err(error) = self.navigator.back().await {
                    tracing::warn!(error = %error, "Navigating back failed");
                }
                None
            }
        }
    }

    /// Apply one queued event. Returns the outcome if the event ran a submission.
    pub async fn apply(&mut self, event: FormEvent) -> Option<SubmitOutcome> {
        match event {
            FormEvent::FieldEdited { field, value } => {
                self.set_field(field, value);
                None
            }
            FormEvent::FileListChanged(files) => {
                self.on_file_list_change(files);
                None
            }
            FormEvent::PersistedPhotoAvailable(url) => {
                self.on_persisted_photo(&url);
                None
            }
            FormEvent::UpdateCountChanged(count) => self.observe_update_count(count).await,
            FormEvent::DeleteCountChanged(count) => self.observe_delete_count(count).await,
            FormEvent::Command(command) => self.execute(command).await,
            FormEvent::Inspect(reply) => {
                let _ = reply.send(self.snapshot());
                None
            }
        }
    }
}
