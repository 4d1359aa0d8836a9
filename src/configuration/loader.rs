//! Turns a TOML configuration file into a [`RawConfig`], injecting secrets on the way.
//!
//! Credentials and endpoint URLs in the file can either be written literally or
//! be references that are looked up while loading:
//!
//! ```toml
//! [profiles.rinkeby]
//! endpoint_url = { env = "RINKEBY_RPC_URL" }
//! credentials = [
//!     { env = "RINKEBY_DEPLOYER_KEY" },
//!     { file = "secrets/rinkeby.key" },
//! ]
//! ```
//!
//! Relative `file` paths are relative to the directory containing the configuration file.
//! Values read from the environment or from files have surrounding whitespace trimmed.
//! Literal credentials are accepted, but logged as a warning.

use std::{
    fs,
    path::{Path, PathBuf},
};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    structure::{ProfileOverride, RawConfig, UnresolvedCompilerSettings},
    utilities::{get_default_configuration_file_path, OrderedTable},
};


#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ConfigurationFile {
    compiler: UnresolvedCompilerSettings,

    output_path: String,

    #[serde(default)]
    default_profile: Option<String>,

    #[serde(default)]
    profiles: OrderedTable<ProfileTable>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ProfileTable {
    #[serde(default)]
    chain_id: Option<u64>,

    #[serde(default)]
    endpoint_url: Option<SecretSource>,

    #[serde(default)]
    credentials: Option<Vec<SecretSource>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EnvironmentReference {
    env: String,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FileReference {
    file: PathBuf,
}

/// A value that is either written inline or looked up at load time.
///
/// Reference tables take exactly one key, so `{ env = "..", file = ".." }` is rejected.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SecretSource {
    Literal(String),
    Environment(EnvironmentReference),
    File(FileReference),
}


impl SecretSource {
    fn is_literal(&self) -> bool {
        matches!(self, SecretSource::Literal(_))
    }

    /// `field_path` only names the field in logs and error messages.
    fn load(self, base_directory: &Path, field_path: &str) -> Result<String> {
        match self {
            SecretSource::Literal(value) => Ok(value),
            SecretSource::Environment(EnvironmentReference { env }) => {
                debug!(
                    field = field_path,
                    variable = %env,
                    "Reading value from environment."
                );

                let value = std::env::var(&env).into_diagnostic().wrap_err_with(|| {
                    miette!(
                        "Could not read environment variable {} for {}.",
                        env,
                        field_path
                    )
                })?;

                Ok(value.trim().to_string())
            }
            SecretSource::File(FileReference { file }) => {
                let file_path = base_directory.join(file);
                debug!(
                    field = field_path,
                    path = %file_path.display(),
                    "Reading value from file."
                );

                let contents = fs::read_to_string(&file_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        miette!(
                            "Could not read file {} for {}.",
                            file_path.display(),
                            field_path
                        )
                    })?;

                Ok(contents.trim().to_string())
            }
        }
    }
}

impl ProfileTable {
    fn into_profile_override(
        self,
        base_directory: &Path,
        profile: &str,
    ) -> Result<ProfileOverride> {
        let endpoint_url = self
            .endpoint_url
            .map(|source| {
                source.load(
                    base_directory,
                    &format!("profiles.{profile}.endpoint_url"),
                )
            })
            .transpose()?;

        let credentials = self
            .credentials
            .map(|sources| {
                sources
                    .into_iter()
                    .enumerate()
                    .map(|(index, source)| {
                        if source.is_literal() {
                            warn!(
                                profile,
                                index,
                                "Credential is embedded literally in the configuration file, \
                                 prefer an {{ env = \"...\" }} or {{ file = \"...\" }} reference."
                            );
                        }

                        source.load(
                            base_directory,
                            &format!("profiles.{profile}.credentials[{index}]"),
                        )
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(ProfileOverride {
            chain_id: self.chain_id,
            endpoint_url,
            credentials,
        })
    }
}


impl RawConfig {
    /// Parse a configuration from a TOML string.
    ///
    /// `base_directory` is used to resolve relative `file` references.
    pub fn from_toml_str<P: AsRef<Path>>(contents: &str, base_directory: P) -> Result<Self> {
        let configuration_file = toml::from_str::<ConfigurationFile>(contents)
            .into_diagnostic()
            .wrap_err("Could not parse configuration file!")?;

        let mut profiles = Vec::with_capacity(configuration_file.profiles.0.len());
        for (name, profile_table) in configuration_file.profiles.0 {
            let profile = profile_table
                .into_profile_override(base_directory.as_ref(), &name)
                .wrap_err_with(|| miette!("Failed to load profile {}.", name))?;

            profiles.push((name, profile));
        }

        Ok(RawConfig {
            compiler: configuration_file.compiler,
            output_path: configuration_file.output_path,
            default_profile: configuration_file.default_profile,
            profiles,
        })
    }

    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(configuration_file_path: S) -> Result<Self> {
        let configuration_file_path = dunce::canonicalize(configuration_file_path.as_ref())
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Could not find configuration file {}.",
                    configuration_file_path.as_ref().display()
                )
            })?;

        // Read the configuration file into memory.
        let configuration_string = fs::read_to_string(&configuration_file_path)
            .into_diagnostic()
            .wrap_err("Could not read configuration file!")?;

        let base_directory = configuration_file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let raw_configuration = RawConfig::from_toml_str(&configuration_string, base_directory)
            .wrap_err_with(|| {
                miette!(
                    "Could not load configuration file {}.",
                    configuration_file_path.display()
                )
            })?;

        debug!(
            path = %configuration_file_path.display(),
            profiles = raw_configuration.profiles.len(),
            "Configuration file loaded."
        );

        Ok(raw_configuration)
    }

    /// Load the configuration from the default path (`./deployconf.toml`).
    pub fn load_from_default_path() -> Result<Self> {
        RawConfig::load_from_path(
            get_default_configuration_file_path()
                .wrap_err_with(|| "Could not load configuration file at default path.")?,
        )
    }
}
