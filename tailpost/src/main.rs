use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tailpost_core::cli::config::{self, CONFIG_ERROR_EXIT, ConfigCmd};
use tailpost_core::conf::load_config;
use tailpost_core::logging::{LogFormat, init_logging};
use tailpost_core::runtime;

const DEFAULT_CONFIG: &str = "config/tailpost.toml";

#[derive(Parser, Debug)]
#[command(
    name = "tailpost",
    version,
    about = "Tailpost: follow growing files and forward appended bytes"
)]
struct Cli {
    /// Log line format (logs are written to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },

    /// Tail the configured files (default)
    Run {
        /// Path to the tailpost config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => match config::run(cmd) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("config error: {e:#}");
                ExitCode::from(CONFIG_ERROR_EXIT)
            }
        },

        Some(Command::Run { config }) => run(&config, cli.log_format),

        None => run(Path::new(DEFAULT_CONFIG), cli.log_format),
    }
}

fn run(path: &Path, format: LogFormat) -> ExitCode {
    init_logging(format);

    let validated = match load_config(path) {
        Ok(validated) => validated,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "failed to load config");
            config::print_config_error(&err, true);
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    for warning in &validated.validation.warnings {
        tracing::warn!(origin = %warning.origin, "{}", warning.message);
    }

    match runtime::run(validated.config) {
        Ok(status) => status.into(),
        Err(e) => {
            tracing::error!(error = %e, "tailpost stopped");
            ExitCode::FAILURE
        }
    }
}
