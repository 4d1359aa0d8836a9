//! Command-line interface definitions for the `deployconf` binary.

use std::path::PathBuf;

use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "deployconf",
    author,
    about = "Validates a build/deploy configuration and prints the resolved profiles.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./deployconf.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. Defaults to ./deployconf.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "profile",
        help = "Print only this profile.",
        conflicts_with = "selected_profile"
    )]
    pub profile: Option<String>,

    #[arg(
        long = "selected-profile",
        help = "Print only the profile a deployment would use when none is named: \
                the default profile, or the only profile if there is just one."
    )]
    pub selected_profile: bool,

    #[arg(
        long = "show-build",
        help = "Also print the build settings (compiler and artifact output path)."
    )]
    pub show_build: bool,

    #[arg(
        long = "console-log-level",
        default_value = "warn",
        help = "Console (stderr) log filter, in tracing EnvFilter syntax. Defaults to \"warn\"."
    )]
    pub console_log_level: String,

    #[arg(
        long = "log-file-directory",
        help = "If set, logs are additionally written to a daily-rolling file in this directory."
    )]
    pub log_file_directory: Option<PathBuf>,

    #[arg(
        long = "log-file-level",
        default_value = "debug",
        help = "Log file filter, in tracing EnvFilter syntax. Defaults to \"debug\"."
    )]
    pub log_file_level: String,
}


/// Parse a tracing filter directive, naming the argument it came from on failure.
pub fn parse_level_filter(directive: &str, argument_name: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to parse argument {}: {:?}", argument_name, directive))
}
