mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "config/tailpost.toml")]
        path: PathBuf,

        /// Print the validation report without colors
        #[arg(short, long, default_value = "false")]
        plain: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "config/tailpost.toml")]
        path: PathBuf,

        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Write a starter config file
    Init {
        /// Path of the config file to create
        #[arg(default_value = "config/tailpost.toml")]
        path: PathBuf,
    },
}

/// Runs a `config` subcommand, returning the process exit code.
pub fn run(cmd: ConfigCmd) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCmd::Check { path, plain } => Ok(ExitCode::from(check(path, plain))),
        ConfigCmd::Dump { path, json } => {
            dump(path, json)?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCmd::Init { path } => {
            init(path)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
