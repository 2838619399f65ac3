use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::{CartObserver, Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogObserverError {
    BufferPoisoned,
}

impl fmt::Display for LogObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogObserverError::BufferPoisoned => write!(f, "log observer buffer poisoned"),
        }
    }
}

impl std::error::Error for LogObserverError {}

/// Logs notifications through `tracing`, and optionally into a line buffer.
///
/// Successes log at `info`, failures at `warn`.
#[derive(Default)]
pub struct LogObserver {
    buffer: Option<Arc<Mutex<Vec<String>>>>,
}

impl LogObserver {
    pub fn new() -> Self {
        LogObserver { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        LogObserver {
            buffer: Some(buffer),
        }
    }

    fn record(&self, line: String) -> Result<(), LogObserverError> {
        if let Some(buffer) = &self.buffer {
            let mut buffer = buffer
                .lock()
                .map_err(|_| LogObserverError::BufferPoisoned)?;
            buffer.push(line);
        }
        Ok(())
    }
}

impl CartObserver for LogObserver {
    fn notify(&mut self, notification: &Notification) {
        let tag = if notification.is_success() {
            info!(
                product_id = %notification.product_id,
                notice = ?notification.notice,
                "{}",
                notification.message
            );
            "SUCCESS"
        } else {
            warn!(
                product_id = %notification.product_id,
                notice = ?notification.notice,
                "{}",
                notification.message
            );
            "FAILURE"
        };

        let line = format!(
            "[{}] {} {}",
            tag, notification.product_id, notification.message
        );
        if let Err(err) = self.record(line) {
            warn!(error = %err, "dropping cart notification line");
        }
    }
}

/// Keeps every notification it sees. Clones share the same list.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().ok().and_then(|seen| seen.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().map(|seen| seen.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.clear();
        }
    }
}

impl CartObserver for RecordingObserver {
    fn notify(&mut self, notification: &Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification.clone());
        }
    }
}
