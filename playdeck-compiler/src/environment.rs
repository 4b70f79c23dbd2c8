//! Collaborators and limits for one pipeline run.

use playdeck_core::types::DEFAULT_DEPENDENCY_DIRS;
use playdeck_core::{BuildTool, Config, Console, FileSystem};
use playdeck_renderer::{RenderEnvironment, RenderTarget, Renderer};

/// Everything [`compile`](crate::compile) needs besides the project root.
///
/// Nothing here is global: tests swap in recording fakes for the build tool
/// and console.
pub struct Environment<'a> {
    pub fs: &'a dyn FileSystem,
    pub build_tool: &'a dyn BuildTool,
    pub console: &'a dyn Console,
    pub renderer: &'a Renderer,
    /// Upper bound on playgrounds compiled at the same time.
    pub jobs: usize,
    pub dependency_dirs: Vec<String>,
}

impl<'a> Environment<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        build_tool: &'a dyn BuildTool,
        console: &'a dyn Console,
        renderer: &'a Renderer,
    ) -> Self {
        Environment {
            fs,
            build_tool,
            console,
            renderer,
            jobs: 1,
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
        }
    }

    /// Take `jobs` and `dependency_dirs` from `config`.
    pub fn configured(mut self, config: &Config) -> Self {
        self.jobs = config.jobs();
        self.dependency_dirs = config.dependency_dirs.clone();
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub(crate) fn render_environment(&self, target: RenderTarget) -> RenderEnvironment<'a> {
        RenderEnvironment::new(self.fs, self.renderer, target)
            .with_dependency_dirs(self.dependency_dirs.iter().cloned())
    }
}
