use clap::Parser;
use miette::{Context, Result};
use tracing::{debug, info};

use crate::{
    cli::{parse_level_filter, CLIArgs},
    logging::initialize_tracing,
};
use deployconf::configuration::{
    redact_endpoint_url,
    resolve,
    BuildSettings,
    NetworkSettings,
    OptimizerSettings,
    RawConfig,
    ResolvedConfiguration,
    ResolvedProfile,
};

mod cli;
mod logging;


fn format_optimizer(optimizer: &OptimizerSettings) -> String {
    match optimizer {
        OptimizerSettings::Disabled => "disabled".to_string(),
        OptimizerSettings::Enabled { runs, details } if details.is_empty() => {
            format!("enabled, {runs} runs")
        }
        OptimizerSettings::Enabled { runs, details } => {
            let passes = details.keys().cloned().collect::<Vec<_>>().join(", ");
            format!("enabled, {runs} runs, pass details for {passes}")
        }
    }
}

fn print_build_settings(build_settings: &BuildSettings) {
    println!("Build settings");
    println!("  compiler:    {}", build_settings.compiler.version);
    println!(
        "  optimizer:   {}",
        format_optimizer(&build_settings.compiler.optimizer)
    );
    println!("  output path: {}", build_settings.output_path.display());
}

fn print_profile(profile: &ResolvedProfile, is_default: bool) {
    let default_marker = if is_default { " (default)" } else { "" };
    println!("Profile {}{}", profile.name(), default_marker);

    match profile.network() {
        NetworkSettings::Local { chain_id } => {
            println!("  network:     local, chain id {chain_id}");
        }
        NetworkSettings::Remote {
            chain_id,
            endpoint_url,
            credentials,
        } => {
            match chain_id {
                Some(chain_id) => println!("  network:     remote, chain id {chain_id}"),
                None => println!("  network:     remote, chain id not pinned"),
            }
            println!("  endpoint:    {}", redact_endpoint_url(endpoint_url));

            let fingerprints = credentials
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            if fingerprints.is_empty() {
                println!("  credentials: none");
            } else {
                println!("  credentials: {}", fingerprints.join(", "));
            }
        }
    }
}

fn print_resolved_configuration(configuration: &ResolvedConfiguration) {
    for profile in configuration.profiles() {
        print_profile(
            profile,
            configuration.default_profile() == Some(profile.name()),
        );
    }
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let console_level_filter =
        parse_level_filter(&cli_args.console_log_level, "--console-log-level")?;
    let log_file_output = match cli_args.log_file_directory.as_deref() {
        Some(directory) => Some((
            parse_level_filter(&cli_args.log_file_level, "--log-file-level")?,
            directory,
        )),
        None => None,
    };

    let logging_raii_guard =
        initialize_tracing(console_level_filter, log_file_output, "deployconf.log")
            .wrap_err("Failed to initialize tracing.")?;

    debug!("Tracing initialized.");


    // Load configuration.
    let raw_configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration.");
            RawConfig::load_from_path(path)
        }
        None => {
            info!("Loading configuration at default path.");
            RawConfig::load_from_default_path()
        }
    }
    .wrap_err("Failed to load configuration file.")?;

    let resolved_configuration =
        resolve(raw_configuration).wrap_err("Failed to resolve configuration.")?;

    info!(
        profiles = resolved_configuration.len(),
        compiler = %resolved_configuration.compiler().version,
        "Configuration resolved."
    );


    if cli_args.show_build {
        print_build_settings(&resolved_configuration.build_settings());
    }

    if cli_args.profile.is_some() || cli_args.selected_profile {
        let profile = resolved_configuration
            .select(cli_args.profile.as_deref())
            .wrap_err("Failed to select profile.")?;

        print_profile(
            profile,
            resolved_configuration.default_profile() == Some(profile.name()),
        );
    } else {
        print_resolved_configuration(&resolved_configuration);
    }


    drop(logging_raii_guard);
    Ok(())
}
