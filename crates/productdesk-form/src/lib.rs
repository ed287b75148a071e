//! Product form core.
//!
//! Keeps the editable draft, the upload widget's file list and the derived
//! photo consistent, and sequences create/update/delete submissions through
//! validation, the remote write, navigation and notification. Events are fed
//! through a single-threaded queue ([`runtime::FormRuntime`]).

pub mod form;
pub mod portfolio;
pub mod runtime;
pub mod store;
pub mod submission;
pub mod thumbnail;
pub mod trigger;
pub mod upload;

pub use form::{Collaborators, ProductForm};
pub use runtime::{FormEvent, FormHandle, FormRuntime, FormSnapshot};
pub use store::{Field, FormStore};
pub use submission::{Operation, Phase, SubmissionController, SubmitOutcome};
pub use trigger::{FormCommand, TriggerBridge};
pub use upload::UploadReconciler;
