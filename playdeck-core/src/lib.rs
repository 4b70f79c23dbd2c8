//! playdeck core library: domain types, collaborator traits, configuration, errors.
//!
//! Public API surface:
//! - [`types`]: path newtypes, [`Platform`], on-disk naming conventions
//! - [`nonempty`]: [`NonEmpty`], the "at least one" collection
//! - [`system`]: [`FileSystem`], [`BuildTool`] and [`Console`] collaborators
//! - [`config`]: `playdeck.yaml` loading
//! - [`error`]: [`DiscoveryError`], [`BuildError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod nonempty;
pub mod system;
pub mod types;

pub use config::{Config, Toolchain};
pub use error::{BuildError, ConfigError, DiscoveryError};
pub use nonempty::NonEmpty;
pub use system::{BuildTool, Console, FileSystem, PageBuild};
pub use types::{PagePath, Platform, PlaygroundPath, WorkspacePath};
