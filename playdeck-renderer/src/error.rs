//! Error types for playdeck-renderer.

use std::path::PathBuf;

use thiserror::Error;

use playdeck_core::DiscoveryError;

use crate::syntax::SyntaxError;

/// All errors that can arise while rendering pages.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The project structure could not be resolved.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A page's source is malformed.
    #[error("invalid page '{}': {source}", page.display())]
    Syntax {
        page: PathBuf,
        #[source]
        source: SyntaxError,
    },

    /// Filesystem error while reading a page or user templates.
    #[error("render io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedded or user templates failed to load.
    #[error("template engine error: {0}")]
    Templates(#[from] tera::Error),

    /// A page failed to render through its template.
    #[error("template error for '{}': {source}", page.display())]
    Template {
        page: PathBuf,
        #[source]
        source: tera::Error,
    },
}

impl RenderError {
    /// The page this error is about, when there is one.
    pub fn page(&self) -> Option<&std::path::Path> {
        match self {
            RenderError::Syntax { page, .. } | RenderError::Template { page, .. } => Some(page),
            RenderError::Io { path, .. } => Some(path),
            RenderError::Discovery(_) | RenderError::Templates(_) => None,
        }
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
