use std::{collections::HashSet, path::PathBuf};

pub use self::compiler::{
    CompilerSettings,
    CompilerVersion,
    OptimizerDetails,
    OptimizerSettings,
    UnresolvedCompilerSettings,
    UnresolvedOptimizerSettings,
    DEFAULT_OPTIMIZER_RUNS,
};
pub use self::credentials::{MalformedSigningKey, SigningKey, SIGNING_KEY_LENGTH};
use self::profile::ProfileContext;
pub use self::profile::{redact_endpoint_url, NetworkSettings, ProfileOverride, ResolvedProfile};
use super::error::ConfigError;
use super::traits::{ResolvableConfiguration, ResolvableConfigurationWithContext};

mod compiler;
mod credentials;
mod profile;



/// The entire, unvalidated configuration as handed to the resolver.
///
/// Profiles are kept in declaration order, which is also the order they are validated in.
#[derive(Clone, Debug, PartialEq)]
pub struct RawConfig {
    /// Compiler settings shared by every profile.
    pub compiler: UnresolvedCompilerSettings,

    /// Where compiled artifacts are written.
    pub output_path: String,

    /// Profile picked by [`ResolvedConfiguration::select`] when none is named.
    pub default_profile: Option<String>,

    /// Named deployment targets.
    pub profiles: Vec<(String, ProfileOverride)>,
}

impl RawConfig {
    pub fn new<S: Into<String>>(compiler: UnresolvedCompilerSettings, output_path: S) -> Self {
        Self {
            compiler,
            output_path: output_path.into(),
            default_profile: None,
            profiles: Vec::new(),
        }
    }

    pub fn with_profile<S: Into<String>>(mut self, name: S, profile: ProfileOverride) -> Self {
        self.profiles.push((name.into(), profile));
        self
    }

    pub fn with_default_profile<S: Into<String>>(mut self, name: S) -> Self {
        self.default_profile = Some(name.into());
        self
    }
}


/// What the build invoker gets to see: compiler settings and the output path, nothing per-profile.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSettings {
    pub compiler: CompilerSettings,
    pub output_path: PathBuf,
}


/// The validated configuration: global settings plus every resolved profile.
///
/// There is no way to mutate it after resolution, so it can be
/// shared read-only (e.g. behind an `Arc`) between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfiguration {
    compiler: CompilerSettings,
    output_path: PathBuf,
    default_profile: Option<String>,
    profiles: Vec<ResolvedProfile>,
}

impl ResolvedConfiguration {
    pub fn compiler(&self) -> &CompilerSettings {
        &self.compiler
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    pub fn default_profile(&self) -> Option<&str> {
        self.default_profile.as_deref()
    }

    /// Number of resolved profiles (always at least one).
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profile names in declaration order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(ResolvedProfile::name)
    }

    /// Profiles in declaration order.
    pub fn profiles(&self) -> impl Iterator<Item = &ResolvedProfile> {
        self.profiles.iter()
    }

    pub fn profile(&self, name: &str) -> Option<&ResolvedProfile> {
        self.profiles.iter().find(|profile| profile.name() == name)
    }

    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            compiler: self.compiler.clone(),
            output_path: self.output_path.clone(),
        }
    }

    /// Picks one profile for deployment: the named one if `name` is given,
    /// otherwise the configured default, otherwise the only profile if there is exactly one.
    pub fn select(&self, name: Option<&str>) -> Result<&ResolvedProfile, ConfigError> {
        let name = match name.or(self.default_profile()) {
            Some(name) => name,
            None => {
                return match self.profiles.as_slice() {
                    [only_profile] => Ok(only_profile),
                    _ => Err(ConfigError::NoProfileSelected),
                };
            }
        };

        self.profile(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                profile: name.to_string(),
            })
    }

    /// Consumes the configuration and hands out a single profile.
    pub fn into_profile(self, name: &str) -> Result<ResolvedProfile, ConfigError> {
        self.profiles
            .into_iter()
            .find(|profile| profile.name() == name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                profile: name.to_string(),
            })
    }
}


/// Returns the first pair of profiles that share a chain id but disagree on the endpoint.
fn find_chain_id_conflict(profiles: &[ResolvedProfile]) -> Option<ConfigError> {
    for (first_index, first) in profiles.iter().enumerate() {
        let Some(chain_id) = first.chain_id() else {
            continue;
        };

        let conflicting = profiles[first_index + 1..].iter().find(|second| {
            second.chain_id() == Some(chain_id) && second.endpoint_url() != first.endpoint_url()
        });

        if let Some(second) = conflicting {
            return Some(ConfigError::ChainIdConflict {
                first: first.name().to_string(),
                second: second.name().to_string(),
                chain_id,
            });
        }
    }

    None
}


impl ResolvableConfiguration for RawConfig {
    type Resolved = ResolvedConfiguration;

    fn resolve(self) -> Result<Self::Resolved, ConfigError> {
        let compiler = self.compiler.resolve()?;

        if self.output_path.trim().is_empty() {
            return Err(ConfigError::InvalidOutputPath);
        }

        if self.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }


        let mut seen_names = HashSet::with_capacity(self.profiles.len());
        let mut profiles = Vec::with_capacity(self.profiles.len());

        for (name, profile) in self.profiles {
            if !seen_names.insert(name.clone()) {
                return Err(ConfigError::DuplicateProfile { profile: name });
            }

            profiles.push(profile.resolve(ProfileContext {
                name,
                compiler: compiler.clone(),
            })?);
        }


        if let Some(conflict) = find_chain_id_conflict(&profiles) {
            return Err(conflict);
        }

        if let Some(default_profile) = &self.default_profile {
            if !seen_names.contains(default_profile) {
                return Err(ConfigError::UnknownDefaultProfile {
                    profile: default_profile.clone(),
                });
            }
        }


        Ok(ResolvedConfiguration {
            compiler,
            output_path: PathBuf::from(self.output_path),
            default_profile: self.default_profile,
            profiles,
        })
    }
}


/// Validates `raw` and merges the global compiler settings into each of its profiles.
///
/// This is pure: it does no I/O, reads no environment and does not log.
/// Either every profile resolves or an error describing the first problem is returned.
pub fn resolve(raw: RawConfig) -> Result<ResolvedConfiguration, ConfigError> {
    raw.resolve()
}



#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    const KEY: &str = "0xb6a567187c05c73c66ebf0540d2757761618f931f0f4f721285ebdf10fa17c98";

    fn compiler() -> UnresolvedCompilerSettings {
        UnresolvedCompilerSettings {
            version: "0.8.18".to_string(),
            optimizer: Some(UnresolvedOptimizerSettings {
                enabled: true,
                runs: 200,
                details: None,
            }),
        }
    }

    fn raw() -> RawConfig {
        RawConfig::new(compiler(), "./client/artifacts")
            .with_profile("hardhat", ProfileOverride::local(31337))
            .with_profile(
                "polymain",
                ProfileOverride::remote("https://polygon-rpc.com/")
                    .with_chain_id(137)
                    .with_credentials([KEY]),
            )
    }

    #[test]
    fn validates_compiler_before_profiles() {
        let mut config = RawConfig::new(compiler(), "out");
        config.compiler.version = "latest".to_string();

        // No profiles either, but the compiler block is checked first.
        assert!(matches!(
            resolve(config),
            Err(ConfigError::InvalidCompilerVersion { .. })
        ));
    }

    #[test]
    fn empty_output_path_is_rejected() {
        let config =
            RawConfig::new(compiler(), " ").with_profile("local", ProfileOverride::local(1));

        assert_eq!(resolve(config), Err(ConfigError::InvalidOutputPath));
    }

    #[test]
    fn duplicate_profile_names_are_rejected() {
        let config = raw().with_profile("hardhat", ProfileOverride::local(31337));

        assert_eq!(
            resolve(config),
            Err(ConfigError::DuplicateProfile {
                profile: "hardhat".to_string()
            })
        );
    }

    #[test]
    fn profiles_are_validated_in_declaration_order() {
        let config = RawConfig::new(compiler(), "out")
            .with_profile("declared-first", ProfileOverride::remote("nope"))
            .with_profile("declared-second", ProfileOverride::default());

        assert!(matches!(
            resolve(config),
            Err(ConfigError::InvalidEndpoint { ref profile, .. }) if profile == "declared-first"
        ));
    }

    #[test]
    fn same_chain_id_and_endpoint_is_not_a_conflict() {
        let config = raw().with_profile(
            "polymain-readonly",
            ProfileOverride::remote("https://polygon-rpc.com/").with_chain_id(137),
        );

        assert_eq!(resolve(config).unwrap().len(), 3);
    }

    #[test]
    fn local_and_remote_profiles_cannot_share_a_chain_id() {
        let config = raw().with_profile("fork", ProfileOverride::local(137));

        assert_eq!(
            resolve(config),
            Err(ConfigError::ChainIdConflict {
                first: "polymain".to_string(),
                second: "fork".to_string(),
                chain_id: 137,
            })
        );
    }

    #[test]
    fn default_profile_must_exist() {
        let config = raw().with_default_profile("rinkeby");

        assert_eq!(
            resolve(config),
            Err(ConfigError::UnknownDefaultProfile {
                profile: "rinkeby".to_string()
            })
        );
    }

    #[test]
    fn select_prefers_explicit_then_default_then_single() {
        let resolved = resolve(raw().with_default_profile("hardhat")).unwrap();
        assert_eq!(resolved.select(Some("polymain")).unwrap().name(), "polymain");
        assert_eq!(resolved.select(None).unwrap().name(), "hardhat");
        assert_eq!(
            resolved.select(Some("rinkeby")),
            Err(ConfigError::ProfileNotFound {
                profile: "rinkeby".to_string()
            })
        );

        let without_default = resolve(raw()).unwrap();
        assert_eq!(without_default.select(None), Err(ConfigError::NoProfileSelected));

        let single = resolve(
            RawConfig::new(compiler(), "out").with_profile("only", ProfileOverride::local(1)),
        )
        .unwrap();
        assert_eq!(single.select(None).unwrap().name(), "only");
    }

    #[test]
    fn build_settings_carry_no_profile_data() {
        let resolved = resolve(raw()).unwrap();
        let build = resolved.build_settings();

        assert_eq!(&build.compiler, resolved.compiler());
        assert_eq!(build.output_path, PathBuf::from("./client/artifacts"));
    }

    #[test]
    fn into_profile_hands_out_one_profile() {
        let profile = resolve(raw()).unwrap().into_profile("polymain").unwrap();

        assert_eq!(profile.chain_id(), Some(137));
        assert_eq!(profile.credentials()[0].expose_hex(), KEY);
    }

    #[test]
    fn resolved_configuration_is_shareable_across_threads() {
        let resolved = Arc::new(resolve(raw()).unwrap());

        let handles = (0..4)
            .map(|_| {
                let resolved = Arc::clone(&resolved);
                std::thread::spawn(move || resolved.select(Some("hardhat")).map(|p| p.chain_id()))
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(Some(31337)));
        }
    }
}
