use super::error::ConfigError;

/// A configuration section that validates itself into its resolved form.
///
/// Resolution must not read the environment or the filesystem. A failure is
/// reported as a [`ConfigError`] naming the offending field (see [`ConfigError::field_path`]),
/// never as a partially resolved value.
pub trait ResolvableConfiguration {
    type Resolved;

    fn resolve(self) -> Result<Self::Resolved, ConfigError>;
}

/// Like [`ResolvableConfiguration`], for sections that can only be validated
/// with something from their surroundings, e.g. a profile that needs its own name
/// and a copy of the already resolved compiler settings.
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, ConfigError>;
}
