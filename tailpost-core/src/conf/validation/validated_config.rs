use crate::conf::RuntimeConfig;
use crate::conf::validation::report::ValidationReport;

/// A runtime config that passed validation, with the warnings it produced.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: RuntimeConfig,
    pub validation: ValidationReport,
}
