use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level layout of `tailpost.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntrypointSpec {
    // Configuration schema version
    pub version: u32,

    #[serde(default)]
    pub server: ServerSpec,

    pub tail: TailSpec,

    #[serde(default)]
    pub sink: SinkSpec,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSpec {
    /// Optional pid file path
    pub pid_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TailSpec {
    /// Paths or glob patterns, tailed in the order given.
    pub files: Vec<String>,

    #[serde(default = "default_count")]
    pub count: u64,

    #[serde(default)]
    pub unit: CountUnit,

    #[serde(default)]
    pub from: Direction,

    /// Banners are written when more than this many files are tracked.
    #[serde(default = "default_header_threshold")]
    pub header_threshold: usize,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Keep polling paths that are missing or get replaced.
    #[serde(default = "default_retry_missing")]
    pub retry_missing: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SinkSpec {
    /// Collector URL receiving forwarded bytes. Absent means stdout only.
    pub destination: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub on_failure: FailurePolicy,
}

impl Default for SinkSpec {
    fn default() -> Self {
        Self {
            destination: None,
            timeout_ms: default_timeout_ms(),
            on_failure: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountUnit {
    #[default]
    Lines,
    Bytes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Direction {
    /// Last N units of the file.
    #[default]
    #[serde(rename = "tail")]
    FromTail,
    /// Everything from the N-th unit on (1-based).
    #[serde(rename = "top")]
    FromTop,
}

/// What to do when the sink rejects a chunk for a recoverable reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and drop the chunk.
    #[default]
    Drop,
    /// Abort the run.
    Fail,
}

fn default_count() -> u64 {
    10
}

fn default_header_threshold() -> usize {
    1
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_retry_missing() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    5000
}
