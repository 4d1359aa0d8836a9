use miette::Diagnostic;
use thiserror::Error;


/// Everything that can go wrong while resolving a [`RawConfig`][super::RawConfig]
/// or selecting a profile out of a [`ResolvedConfiguration`][super::ResolvedConfiguration].
///
/// Every variant can report the path of the offending field
/// through [`ConfigError::field_path`].
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No profiles are defined, at least one deployment target is required.")]
    #[diagnostic(
        code(deployconf::no_profiles),
        help("Add a [profiles.<name>] table, e.g. a local profile with only a chain_id.")
    )]
    NoProfiles,

    #[error("Invalid compiler version {version:?}: {reason}.")]
    #[diagnostic(
        code(deployconf::invalid_compiler_version),
        help("Expected a version of the form MAJOR.MINOR.PATCH, e.g. \"0.8.18\".")
    )]
    InvalidCompilerVersion { version: String, reason: String },

    #[error("Invalid optimizer run count {runs}: must be a positive 32-bit integer.")]
    #[diagnostic(
        code(deployconf::invalid_optimizer_runs),
        help("Set compiler.optimizer.runs to a value such as 200, or disable the optimizer.")
    )]
    InvalidOptimizerRuns { runs: i64 },

    #[error("The artifact output path must not be empty.")]
    #[diagnostic(code(deployconf::invalid_output_path))]
    InvalidOutputPath,

    #[error("Profile {profile:?} is defined more than once.")]
    #[diagnostic(code(deployconf::duplicate_profile))]
    DuplicateProfile { profile: String },

    #[error("Profile {profile:?} has an invalid endpoint URL {url:?}: {reason}.")]
    #[diagnostic(
        code(deployconf::invalid_endpoint),
        help("Endpoints must be absolute http:// or https:// URLs with a host.")
    )]
    InvalidEndpoint {
        profile: String,
        url: String,
        reason: String,
    },

    #[error("Local profile {profile:?} is invalid: {reason}.")]
    #[diagnostic(
        code(deployconf::invalid_local_profile),
        help("A profile without endpoint_url is a local simulated chain and takes a chain_id only.")
    )]
    InvalidLocalProfile { profile: String, reason: String },

    #[error("Profile {profile:?} has a malformed credential at index {index}.")]
    #[diagnostic(
        code(deployconf::invalid_credential),
        help("Signing keys are 64 hexadecimal characters, optionally prefixed with 0x.")
    )]
    InvalidCredential { profile: String, index: usize },

    #[error(
        "Profiles {first:?} and {second:?} both use chain id {chain_id} \
         but point at different endpoints."
    )]
    #[diagnostic(code(deployconf::chain_id_conflict))]
    ChainIdConflict {
        first: String,
        second: String,
        chain_id: u64,
    },

    #[error("Default profile {profile:?} is not defined.")]
    #[diagnostic(code(deployconf::unknown_default_profile))]
    UnknownDefaultProfile { profile: String },

    #[error("Profile {profile:?} is not defined.")]
    #[diagnostic(code(deployconf::profile_not_found))]
    ProfileNotFound { profile: String },

    #[error("No profile was selected and no default profile is configured.")]
    #[diagnostic(
        code(deployconf::no_profile_selected),
        help("Pass a profile name explicitly or set default_profile in the configuration.")
    )]
    NoProfileSelected,
}

impl ConfigError {
    /// Dotted path of the configuration field this error refers to,
    /// e.g. `profiles.polymain.credentials[0]`.
    pub fn field_path(&self) -> String {
        match self {
            ConfigError::NoProfiles | ConfigError::NoProfileSelected => "profiles".to_string(),
            ConfigError::InvalidCompilerVersion { .. } => "compiler.version".to_string(),
            ConfigError::InvalidOptimizerRuns { .. } => "compiler.optimizer.runs".to_string(),
            ConfigError::InvalidOutputPath => "output_path".to_string(),
            ConfigError::DuplicateProfile { profile }
            | ConfigError::InvalidLocalProfile { profile, .. }
            | ConfigError::ProfileNotFound { profile } => format!("profiles.{profile}"),
            ConfigError::InvalidEndpoint { profile, .. } => {
                format!("profiles.{profile}.endpoint_url")
            }
            ConfigError::InvalidCredential { profile, index } => {
                format!("profiles.{profile}.credentials[{index}]")
            }
            ConfigError::ChainIdConflict { second, .. } => format!("profiles.{second}.chain_id"),
            ConfigError::UnknownDefaultProfile { .. } => "default_profile".to_string(),
        }
    }
}
