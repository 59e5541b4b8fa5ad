use crate::conf::{ConfigError, CountUnit, Direction, ValidationReport, load_config};
use std::path::PathBuf;

/// Exit code for configuration errors.
pub const CONFIG_ERROR_EXIT: u8 = 2;

/// Loads and validates `path`, printing a summary. Returns the exit code.
pub fn check(path: PathBuf, plain: bool) -> u8 {
    match load_config(&path) {
        Ok(validated) => {
            let cfg = &validated.config;
            let unit = match cfg.tail.unit {
                CountUnit::Lines => "lines",
                CountUnit::Bytes => "bytes",
            };
            let direction = match cfg.tail.direction {
                Direction::FromTail => "last",
                Direction::FromTop => "from",
            };

            println!("✔ Config loaded successfully");
            println!("✔ {} files", cfg.files.len());
            println!("✔ {direction} {} {unit}", cfg.tail.count);
            match &cfg.sink.destination {
                Some(url) => println!("✔ forwarding to {url}"),
                None => println!("✔ no sink configured (stdout only)"),
            }

            if validated.validation.has_violations() {
                print_report(&validated.validation, plain);
            }
            0
        }
        Err(err) => {
            print_config_error(&err, plain);
            CONFIG_ERROR_EXIT
        }
    }
}

pub fn print_config_error(err: &ConfigError, plain: bool) {
    match err {
        ConfigError::Validation { report } => print_report(report, plain),
        other => eprintln!("{other}"),
    }
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

fn print_report(report: &ValidationReport, plain: bool) {
    if plain {
        eprint!("{}", report.render_plain());
    } else {
        eprint!("{}", report.render_pretty());
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Create a starter config with:\n\
             \n\
             tailpost config init",
        ),

        ConfigError::NoMatches { .. } => Some(
            "Patterns that match nothing are only allowed when missing files\n\
             are retried:\n\
             \n\
             [tail]\n\
             retry_missing = true",
        ),

        ConfigError::Parse { .. } => Some(
            "A minimal config looks like:\n\
             \n\
             version = 1\n\
             \n\
             [tail]\n\
             files = [\"/var/log/app.log\"]",
        ),

        _ => None,
    }
}
