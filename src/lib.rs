//! Layered build/deploy profile resolution for smart-contract toolchains.
//!
//! A configuration declares one compiler (version and optimizer settings), an artifact
//! output path and a set of named network profiles. [`configuration::resolve`] validates
//! all of it at once and merges the compiler settings into every profile:
//!
//! ```
//! use deployconf::configuration::{
//!     resolve,
//!     ProfileOverride,
//!     RawConfig,
//!     UnresolvedCompilerSettings,
//! };
//!
//! let raw = RawConfig::new(
//!     UnresolvedCompilerSettings {
//!         version: "0.8.18".to_string(),
//!         optimizer: None,
//!     },
//!     "./client/artifacts",
//! )
//! .with_profile("hardhat", ProfileOverride::local(31337));
//!
//! let resolved = resolve(raw).unwrap();
//! assert_eq!(resolved.select(None).unwrap().chain_id(), Some(31337));
//! ```

pub mod configuration;
