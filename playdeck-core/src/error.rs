//! Error types for playdeck-core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while discovering workspaces, playgrounds and pages.
///
/// Every variant names the directory or file that caused it so the message
/// can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("not found any valid workspace in '{root}'")]
    NoWorkspaces { root: PathBuf },

    #[error("expected exactly one workspace in '{root}', found {found}")]
    AmbiguousWorkspace { root: PathBuf, found: usize },

    #[error("can not find any playground in the workspaces under '{root}'")]
    NoPlaygrounds { root: PathBuf },

    /// A workspace references a playground that does not exist on disk.
    #[error("playground '{playground}' referenced by '{workspace}' is not linked properly")]
    BrokenPlaygroundLink {
        workspace: PathBuf,
        playground: PathBuf,
    },

    /// A playground references a page that does not exist on disk.
    #[error("page '{page}' referenced by '{playground}' is not linked properly")]
    BrokenPageLink { playground: PathBuf, page: PathBuf },

    #[error("can not find any page in '{playground}'")]
    NoPagesFound { playground: PathBuf },

    /// The descriptor lists no pages and `Pages/` holds more than one candidate.
    #[error("can not infer the pages of '{playground}': {found} candidates and no page list")]
    AmbiguousPages { playground: PathBuf, found: usize },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Convenience constructor for [`DiscoveryError::Io`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures reported by a [`BuildTool`](crate::BuildTool) implementation.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The external program could not be started at all.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program ran and ended with a nonzero status.
    #[error("`{command}` failed ({status}){}", format_stderr(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Failures while loading `playdeck.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_messages_name_the_path() {
        let err = DiscoveryError::NoWorkspaces {
            root: PathBuf::from("/code/app"),
        };
        assert_eq!(err.to_string(), "not found any valid workspace in '/code/app'");

        let err = DiscoveryError::BrokenPageLink {
            playground: PathBuf::from("/code/A.playground"),
            page: PathBuf::from("/code/A.playground/Pages/Intro.xcplaygroundpage"),
        };
        assert!(err.to_string().contains("Intro.xcplaygroundpage"));
    }

    #[test]
    fn build_failure_message_includes_trimmed_stderr() {
        let err = BuildError::Failed {
            command: "xcodebuild build".to_string(),
            status: "exit status: 65".to_string(),
            stderr: "  ** BUILD FAILED **\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`xcodebuild build` failed (exit status: 65): ** BUILD FAILED **"
        );
    }

    #[test]
    fn build_failure_message_without_stderr() {
        let err = BuildError::Failed {
            command: "swiftc".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`swiftc` failed (exit status: 1)");
    }
}
