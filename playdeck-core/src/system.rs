//! Collaborator traits injected into discovery, rendering and compilation.
//!
//! Nothing in the pipeline touches process-wide state: the filesystem, the
//! external build tool and the status console are always passed in. All three
//! are `Send + Sync` because discovery and compilation fan out over rayon.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::types::{Platform, PlaygroundPath, WorkspacePath};

/// Read-only view of the filesystem used by discovery and rendering.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Every file and directory below `root`, depth-first, in a stable order.
    /// With `skip_hidden`, dot-prefixed entries and everything beneath them
    /// are left out.
    fn enumerate(&self, root: &Path, skip_hidden: bool) -> io::Result<Vec<PathBuf>>;

    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Entry names directly inside `path`, sorted.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Everything the build tool needs to compile one rendered page.
#[derive(Debug, Clone, Copy)]
pub struct PageBuild<'a> {
    /// Source produced by the render engine for the compile target.
    pub rendered: &'a str,
    /// File-name-safe page title.
    pub page_name: &'a str,
    pub playground: &'a PlaygroundPath,
    pub workspace: &'a WorkspacePath,
    pub platform: Platform,
    /// Products of the workspace build this page links against.
    pub artifacts: &'a [PathBuf],
}

/// External compiler / toolchain.
pub trait BuildTool: Send + Sync {
    /// Build the workspace and return the directories holding its products.
    /// With `cached`, an existing build may be reused.
    fn compile_workspace(
        &self,
        workspace: &WorkspacePath,
        platform: Platform,
        cached: bool,
    ) -> Result<Vec<PathBuf>, BuildError>;

    fn compile_page(&self, page: &PageBuild<'_>) -> Result<(), BuildError>;
}

/// Status sink for user-facing progress.
///
/// Calls are fire-and-forget. Implementations must keep each call's output
/// contiguous; callers that need several calls to stay together serialize
/// them on their side.
pub trait Console: Send + Sync {
    fn print_info(&self, text: &str);

    /// Outcome marker for the most recent info line.
    fn print_status(&self, success: bool);

    /// Indented detail lines under the current step.
    fn print_substep(&self, lines: &[String]);
}
