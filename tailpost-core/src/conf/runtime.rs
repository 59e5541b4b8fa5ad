use crate::conf::spec::{CountUnit, Direction, FailurePolicy};
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Validated, lowered configuration the runtime consumes.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    pub files: Vec<PathBuf>,
    pub server: ServerConfig,
    pub tail: TailConfig,
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,
}

/// Session-wide tailing parameters. Immutable once the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailConfig {
    pub count: u64,
    pub unit: CountUnit,
    pub direction: Direction,
    pub header_threshold: usize,
    #[serde(rename = "poll_interval_ms", serialize_with = "duration_millis")]
    pub poll_interval: Duration,
    pub retry_missing: bool,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            count: 10,
            unit: CountUnit::Lines,
            direction: Direction::FromTail,
            header_threshold: 1,
            poll_interval: Duration::from_secs(1),
            retry_missing: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SinkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Url>,
    #[serde(rename = "timeout_ms", serialize_with = "duration_millis")]
    pub timeout: Duration,
    pub on_failure: FailurePolicy,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            destination: None,
            timeout: Duration::from_millis(5000),
            on_failure: FailurePolicy::Drop,
        }
    }
}

fn duration_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
