//! This module contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`RawConfig::load_from_path`] followed by [`resolve`].
//!
//! # Internals
//! The entire configuration structure is based on the concept of
//! unvalidated ("unresolved") and validated configuration structures.
//!
//! The loader parses the configuration file into a [`RawConfig`], injecting
//! any referenced secrets. [`resolve`] then recursively turns it
//! (and its compiler block and profiles) into validated ("resolved") versions,
//! producing a [`ResolvedConfiguration`].
//!
//! Resolution itself never touches the filesystem or the environment, so the same
//! [`RawConfig`] always resolves to the same [`ResolvedConfiguration`]
//! (or the same [`ConfigError`]).

#![allow(rustdoc::private_intra_doc_links)]

mod error;
mod loader;
mod structure;
mod traits;
mod utilities;

pub use error::ConfigError;
pub use structure::*;
pub use utilities::{get_default_configuration_file_path, DEFAULT_CONFIGURATION_FILE_NAME};
