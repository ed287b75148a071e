//! Recording fakes for the form's collaborators.
//!
//! Every interaction lands in one shared [`Journal`] so tests can assert on
//! ordering across the API, the router and the notifier.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use productdesk_core::models::{
    FormMode, PhotoRef, ProductData, ProductInput, RouteContext, WriteResponse,
};
use productdesk_core::{ClientConfig, Navigator, Notifier, ProductApi, Severity};
use productdesk_form::{Collaborators, ProductForm};

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Create {
        input: ProductInput,
        file: Option<PhotoRef>,
    },
    Update {
        input: ProductInput,
        file: Option<PhotoRef>,
    },
    Delete(String),
    Navigate(String),
    Back,
    Notify(Severity, String),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Entry>>>);

impl Journal {
    pub fn record(&self, entry: Entry) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.lock().unwrap().clone()
    }

    pub fn api_calls(&self) -> Vec<Entry> {
        self.entries()
            .into_iter()
            .filter(|e| matches!(e, Entry::Create { .. } | Entry::Update { .. } | Entry::Delete(_)))
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Navigate(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<(Severity, String)> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Notify(severity, message) => Some((severity, message)),
                _ => None,
            })
            .collect()
    }
}

/// What the fake API does on its next call.
pub enum Reply {
    Respond(WriteResponse),
    TransportError(&'static str),
    Hang,
}

pub struct FakeApi {
    journal: Journal,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeApi {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn then(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    async fn answer(&self) -> anyhow::Result<WriteResponse> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Respond(ok("ok", None)));
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::TransportError(msg) => Err(anyhow::anyhow!(msg)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl ProductApi for FakeApi {
    async fn create_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> anyhow::Result<WriteResponse> {
        self.journal.record(Entry::Create {
            input: input.clone(),
            file: file.cloned(),
        });
        self.answer().await
    }

    async fn update_product(
        &self,
        input: &ProductInput,
        file: Option<&PhotoRef>,
    ) -> anyhow::Result<WriteResponse> {
        self.journal.record(Entry::Update {
            input: input.clone(),
            file: file.cloned(),
        });
        self.answer().await
    }

    async fn delete_product(&self, slug: &str) -> anyhow::Result<WriteResponse> {
        self.journal.record(Entry::Delete(slug.to_string()));
        self.answer().await
    }

    async fn get_product(&self, _slug: &str) -> anyhow::Result<Option<ProductData>> {
        Ok(None)
    }
}

pub struct FakeNavigator {
    journal: Journal,
    fail: bool,
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn push(&self, path: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow::anyhow!("route {} not found", path));
        }
        self.journal.record(Entry::Navigate(path.to_string()));
        Ok(())
    }

    async fn back(&self) -> anyhow::Result<()> {
        self.journal.record(Entry::Back);
        Ok(())
    }
}

pub struct FakeNotifier {
    journal: Journal,
}

impl Notifier for FakeNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.journal.record(Entry::Notify(severity, message.to_string()));
    }
}

pub fn ok(message: &str, new_slug: Option<&str>) -> WriteResponse {
    WriteResponse {
        status: true,
        message: message.to_string(),
        new_slug: new_slug.map(str::to_string),
    }
}

pub fn refused(message: &str) -> WriteResponse {
    WriteResponse {
        status: false,
        message: message.to_string(),
        new_slug: None,
    }
}

pub fn widget_data() -> ProductData {
    ProductData {
        slug: "widget".into(),
        name: "Widget".into(),
        short_description: "A small widget".into(),
        full_description: "<p>Widgets</p>".into(),
        website: "https://widget.example".into(),
        video_url: String::new(),
        photo: Some("https://cdn.example/widget.png".into()),
    }
}

pub struct Harness {
    pub journal: Journal,
    pub api: FakeApi,
    pub navigator_fails: bool,
    pub config: ClientConfig,
}

impl Harness {
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            api: FakeApi::new(journal.clone()),
            journal,
            navigator_fails: false,
            config: ClientConfig::default(),
        }
    }

    pub fn reply(mut self, reply: Reply) -> Self {
        self.api = self.api.then(reply);
        self
    }

    pub fn submit_timeout(mut self, limit: Duration) -> Self {
        self.config.submit_timeout = Some(limit);
        self
    }

    pub fn failing_navigator(mut self) -> Self {
        self.navigator_fails = true;
        self
    }

    pub fn form(self, mode: FormMode, route: RouteContext) -> (ProductForm, Journal) {
        let collaborators = Collaborators {
            api: Arc::new(self.api),
            navigator: Arc::new(FakeNavigator {
                journal: self.journal.clone(),
                fail: self.navigator_fails,
            }),
            notifier: Arc::new(FakeNotifier {
                journal: self.journal.clone(),
            }),
        };
        (
            ProductForm::new(mode, route, collaborators, &self.config),
            self.journal,
        )
    }
}
