use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use ferrous_arpwatch_application::ports::EventSink;
use ferrous_arpwatch_domain::{DomainError, MonitorEvent};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Writes `[<timestamp>] <message>` lines to stdout and, when configured,
/// appends them to a UTF-8 log file.
pub struct LogFileEventSink {
    log_path: Option<PathBuf>,
    mirror_stdout: bool,
    // Serializes writers so lines never interleave.
    write_lock: Mutex<()>,
}

impl LogFileEventSink {
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            log_path,
            mirror_stdout: true,
            write_lock: Mutex::new(()),
        }
    }

    pub fn without_stdout(mut self) -> Self {
        self.mirror_stdout = false;
        self
    }

    async fn append(&self, path: &Path, line: &str) -> Result<(), DomainError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl EventSink for LogFileEventSink {
    async fn emit(&self, event: &MonitorEvent) {
        let line = format_line(event, Local::now().naive_local());
        let _guard = self.write_lock.lock().await;

        debug!(severity = event.severity().as_str(), "{}", event);

        if self.mirror_stdout {
            let mut stdout = tokio::io::stdout();
            if let Err(e) = stdout.write_all(line.as_bytes()).await {
                warn!(error = %e, "Failed to write event to stdout");
            }
            let _ = stdout.flush().await;
        }

        if let Some(path) = &self.log_path {
            if let Err(e) = self.append(path, &line).await {
                warn!(error = %e, "Failed to append event to log file");
            }
        }
    }
}

/// One complete log line, newline included.
pub fn format_line(event: &MonitorEvent, at: NaiveDateTime) -> String {
    format!("[{}] {}\n", at.format("%Y-%m-%dT%H:%M:%S"), event)
}
