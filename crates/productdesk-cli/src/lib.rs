//! Console implementations of the form's router and notification surface.

use std::sync::Mutex;

use async_trait::async_trait;
use productdesk_core::{Navigator, Notifier, Severity};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Router without a screen: remembers the path history and reports moves.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    history: Mutex<Vec<String>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }
}

#[async_trait]
impl Navigator for ConsoleNavigator {
    async fn push(&self, path: &str) -> anyhow::Result<()> {
        self.history
            .lock()
            .map_err(|_| anyhow::anyhow!("Navigation history poisoned"))?
            .push(path.to_string());
        tracing::info!(path = %path, "Navigated");
        Ok(())
    }

    async fn back(&self) -> anyhow::Result<()> {
        let previous = {
            let mut history = self
                .history
                .lock()
                .map_err(|_| anyhow::anyhow!("Navigation history poisoned"))?;
            history.pop();
            history.last().cloned()
        };
        tracing::info!(path = ?previous, "Navigated back");
        Ok(())
    }
}

/// Prints notifications to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => eprintln!("✔ {}", message),
            Severity::Error => eprintln!("✘ {}", message),
        }
    }
}
