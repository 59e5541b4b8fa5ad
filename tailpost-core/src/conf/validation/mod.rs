mod origin;
mod report;
mod validate;
mod validated_config;

pub use origin::Origin;
pub use report::*;
pub use validate::validate_spec;
#[cfg(test)]
pub use validate::MAX_COUNT;
pub use validated_config::ValidatedConfig;
