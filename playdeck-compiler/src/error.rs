//! Error types for playdeck-compiler.

use std::path::PathBuf;

use thiserror::Error;

use playdeck_core::{BuildError, DiscoveryError};
use playdeck_renderer::RenderError;

/// All errors that can arise from the build and documentation pipelines.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Workspaces, playgrounds or pages could not be resolved.
    #[error("discovery failed: {0}")]
    DiscoveryFailed(#[source] DiscoveryError),

    /// A page could not be rendered.
    #[error("render failed: {0}")]
    RenderFailed(#[source] RenderError),

    /// The folder does not hold exactly one workspace to build against.
    #[error("could not resolve the workspace to build in '{folder}': {source}")]
    WorkspaceResolutionFailed {
        folder: PathBuf,
        #[source]
        source: DiscoveryError,
    },

    /// The workspace build (the pages' dependencies) failed.
    #[error("building workspace '{workspace}' failed: {source}")]
    BuildDependencyFailed {
        workspace: PathBuf,
        #[source]
        source: BuildError,
    },

    /// A page's rendered content does not compile.
    #[error("page '{page}' does not compile: {source}")]
    ContentInvalid {
        page: PathBuf,
        #[source]
        source: BuildError,
    },

    /// Two sources would be written to the same output file.
    #[error("'{first}' and '{second}' would both be written to '{path}'")]
    OutputCollision {
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for CompileError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Discovery(e) => CompileError::DiscoveryFailed(e),
            other => CompileError::RenderFailed(other),
        }
    }
}

/// Convenience constructor for [`CompileError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompileError {
    CompileError::Io {
        path: path.into(),
        source,
    }
}
