use crate::conf::lower::lower_config;
use crate::conf::spec::EntrypointSpec;
use crate::conf::validation::{ValidatedConfig, validate_spec};
use crate::conf::ConfigError;
use std::fs;
use std::path::Path;

/// Load, validate and lower the configuration at `path`.
pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    let spec = load_spec(path)?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all semantic errors)
    //--------------------------------------------------------------------------
    let validation = validate_spec(&spec, path);
    if validation.has_errors() {
        return Err(ConfigError::Validation { report: validation });
    }

    //--------------------------------------------------------------------------
    // Build runtime config
    //--------------------------------------------------------------------------
    let config = lower_config(spec)?;

    Ok(ValidatedConfig { config, validation })
}

/// Read and parse the configuration file without validating it.
pub fn load_spec(path: &Path) -> Result<EntrypointSpec, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}
