//! Single-threaded event queue driving one [`ProductForm`].
//!
//! All input (field edits, file list changes, counters, commands) goes through
//! one `mpsc` channel and is applied in order on a dedicated task, so a file
//! list change is committed before the photo is derived from it and two
//! submissions of the same form never interleave.

use anyhow::{Context, Result};
use productdesk_core::models::UploadFileList;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::form::ProductForm;
use crate::store::{Field, FormStore};
use crate::submission::{Phase, SubmitOutcome};
use crate::trigger::FormCommand;

/// Queue depth for pending form events.
const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug)]
pub enum FormEvent {
    FieldEdited { field: Field, value: String },
    FileListChanged(UploadFileList),
    PersistedPhotoAvailable(String),
    UpdateCountChanged(u64),
    DeleteCountChanged(u64),
    Command(FormCommand),
    Inspect(oneshot::Sender<FormSnapshot>),
}

/// Point-in-time copy of the form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub draft: FormStore,
    pub files: UploadFileList,
    pub busy: bool,
    pub phase: Phase,
}

/// Sending side of a running form. Cloneable; the form stops once every
/// handle is dropped.
#[derive(Clone, Debug)]
pub struct FormHandle {
    tx: mpsc::Sender<FormEvent>,
}

impl FormHandle {
    pub async fn send(&self, event: FormEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| anyhow::anyhow!("Form runtime has stopped"))
    }

    pub async fn edit(&self, field: Field, value: impl Into<String>) -> Result<()> {
        self.send(FormEvent::FieldEdited {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn set_files(&self, files: impl Into<UploadFileList>) -> Result<()> {
        self.send(FormEvent::FileListChanged(files.into())).await
    }

    pub async fn request(&self, command: FormCommand) -> Result<()> {
        self.send(FormEvent::Command(command)).await
    }

    pub async fn snapshot(&self) -> Result<FormSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(FormEvent::Inspect(reply)).await?;
        rx.await.context("Form runtime dropped the snapshot request")
    }
}

pub struct FormRuntime;

impl FormRuntime {
    /// Move the form onto its own task. Outcomes of submissions are published
    /// on the returned receiver; the join handle yields the form back once all
    /// handles are dropped.
    pub fn spawn(
        form: ProductForm,
    ) -> (
        FormHandle,
        mpsc::UnboundedReceiver<SubmitOutcome>,
        JoinHandle<ProductForm>,
    ) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(Self::event_loop(form, rx, outcome_tx));

        (FormHandle { tx }, outcome_rx, task)
    }

    async fn event_loop(
        mut form: ProductForm,
        mut rx: mpsc::Receiver<FormEvent>,
        outcomes: mpsc::UnboundedSender<SubmitOutcome>,
    ) -> ProductForm {
        tracing::debug!("Form runtime started");
        while let Some(event) = rx.recv().await {
            if let Some(outcome) = form.apply(event).await {
                // Nobody listening is fine.
                let _ = outcomes.send(outcome);
            }
        }
        tracing::debug!("Form runtime stopped");
        form
    }
}
