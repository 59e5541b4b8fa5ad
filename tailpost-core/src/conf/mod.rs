mod discover;
mod error;
mod loader;
mod lower;
mod runtime;
mod spec;
#[cfg(test)]
mod tests;
pub(crate) mod validation;

pub use discover::{discover_files, is_glob_pattern};
pub use error::ConfigError;
pub use loader::{load_config, load_spec};
pub use runtime::{RuntimeConfig, ServerConfig, SinkConfig, TailConfig};
pub use spec::{CountUnit, Direction, EntrypointSpec, FailurePolicy, ServerSpec, SinkSpec, TailSpec};
pub use validation::{Severity, ValidatedConfig, ValidationIssue, ValidationReport};
