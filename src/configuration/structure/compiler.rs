use std::{collections::BTreeMap, fmt, num::NonZeroU32, str::FromStr};

use serde::Deserialize;

use crate::configuration::{error::ConfigError, traits::ResolvableConfiguration};


/// Optimizer run count used when the `runs` key is omitted.
pub const DEFAULT_OPTIMIZER_RUNS: i64 = 200;

fn default_optimizer_runs() -> i64 {
    DEFAULT_OPTIMIZER_RUNS
}


/// Pass-specific optimizer options, keyed by compiler pass name.
///
/// The contents are owned by the build invoker and are passed through untouched.
pub type OptimizerDetails = BTreeMap<String, toml::Table>;


#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnresolvedCompilerSettings {
    /// Compiler version, e.g. `0.8.18`.
    pub version: String,

    /// Optimizer block. A missing block means the optimizer is disabled.
    #[serde(default)]
    pub optimizer: Option<UnresolvedOptimizerSettings>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnresolvedOptimizerSettings {
    pub enabled: bool,

    /// Kept signed so that negative values reach validation instead of
    /// failing deserialization.
    #[serde(default = "default_optimizer_runs")]
    pub runs: i64,

    #[serde(default)]
    pub details: Option<OptimizerDetails>,
}


/// Validated compiler settings. Identical for every profile.
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerSettings {
    pub version: CompilerVersion,
    pub optimizer: OptimizerSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OptimizerSettings {
    Disabled,
    Enabled {
        runs: NonZeroU32,
        details: OptimizerDetails,
    },
}

impl OptimizerSettings {
    pub fn is_enabled(&self) -> bool {
        matches!(self, OptimizerSettings::Enabled { .. })
    }

    pub fn runs(&self) -> Option<NonZeroU32> {
        match self {
            OptimizerSettings::Disabled => None,
            OptimizerSettings::Enabled { runs, .. } => Some(*runs),
        }
    }
}


impl ResolvableConfiguration for UnresolvedOptimizerSettings {
    type Resolved = OptimizerSettings;

    fn resolve(self) -> Result<Self::Resolved, ConfigError> {
        // Run count and details of a disabled optimizer are parsed, but never looked at.
        if !self.enabled {
            return Ok(OptimizerSettings::Disabled);
        }

        let runs = u32::try_from(self.runs)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::InvalidOptimizerRuns { runs: self.runs })?;

        Ok(OptimizerSettings::Enabled {
            runs,
            details: self.details.unwrap_or_default(),
        })
    }
}

impl ResolvableConfiguration for UnresolvedCompilerSettings {
    type Resolved = CompilerSettings;

    fn resolve(self) -> Result<Self::Resolved, ConfigError> {
        let version = self.version.parse::<CompilerVersion>()?;

        let optimizer = match self.optimizer {
            Some(optimizer) => optimizer.resolve()?,
            None => OptimizerSettings::Disabled,
        };

        Ok(CompilerSettings { version, optimizer })
    }
}



/// A semantic-version-like compiler version: `MAJOR.MINOR.PATCH`,
/// optionally followed by `-prerelease` and/or `+build` (e.g. `0.8.18+commit.87f61d96`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompilerVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
    pub build: Option<String>,
}

fn is_valid_version_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix.split('.').all(|identifier| {
            !identifier.is_empty()
                && identifier
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl FromStr for CompilerVersion {
    type Err = ConfigError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidCompilerVersion {
            version: version.to_string(),
            reason: reason.to_string(),
        };

        if version.trim().is_empty() {
            return Err(invalid("version is empty"));
        }


        let (remainder, build) = match version.split_once('+') {
            Some((remainder, build)) => (remainder, Some(build)),
            None => (version, None),
        };

        let (core, pre_release) = match remainder.split_once('-') {
            Some((core, pre_release)) => (core, Some(pre_release)),
            None => (remainder, None),
        };


        let components = core.split('.').collect::<Vec<_>>();
        if components.len() != 3 {
            return Err(invalid("expected exactly three dot-separated numbers"));
        }

        let mut numbers = [0u64; 3];
        for (slot, component) in numbers.iter_mut().zip(components) {
            if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid("version components must be non-negative integers"));
            }

            *slot = component
                .parse::<u64>()
                .map_err(|_| invalid("version component is out of range"))?;
        }


        if let Some(pre_release) = pre_release {
            if !is_valid_version_suffix(pre_release) {
                return Err(invalid("malformed pre-release suffix"));
            }
        }

        if let Some(build) = build {
            if !is_valid_version_suffix(build) {
                return Err(invalid("malformed build suffix"));
            }
        }


        Ok(CompilerVersion {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            pre_release: pre_release.map(str::to_string),
            build: build.map(str::to_string),
        })
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }

        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }

        Ok(())
    }
}
