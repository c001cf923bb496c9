use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Diagnostic filter for the tracing subscriber (stderr).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Append-only event log; events are always mirrored to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}
