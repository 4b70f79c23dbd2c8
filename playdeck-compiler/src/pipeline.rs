//! Build pipeline: discover → render → resolve workspace → build workspace →
//! build pages.
//!
//! Every stage must succeed before the next one starts, and the first failure
//! ends the run. The workspace is built exactly once, before any page, since
//! every page links against its products.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use playdeck_core::{DiscoveryError, NonEmpty, PageBuild, PlaygroundPath, WorkspacePath};
use playdeck_renderer::{PlaygroundOutput, RenderTarget};

use crate::environment::Environment;
use crate::error::CompileError;
use crate::reporter::Reporter;

/// What a successful [`compile`] built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    pub root: PathBuf,
    pub workspace: WorkspacePath,
    pub playgrounds: Vec<PlaygroundPath>,
    pub pages: usize,
}

/// Build every playground page found under `root`.
///
/// Playgrounds are compiled concurrently, at most `env.jobs` at a time; the
/// pages of one playground are compiled in order. Once a playground fails no
/// further playground is started, and the error of a failed one is returned.
pub fn compile(env: &Environment<'_>, root: &Path, cached: bool) -> Result<CompileSummary, CompileError> {
    let render_env = env.render_environment(RenderTarget::Compile);

    // 1. Discover
    let playgrounds = render_env
        .system()
        .playgrounds(root)
        .map_err(CompileError::DiscoveryFailed)?;
    debug!("{} playground(s) under {}", playgrounds.len(), root.display());

    // 2. Render
    let rendered: Vec<PlaygroundOutput> = playgrounds
        .as_slice()
        .par_iter()
        .map(|pg| render_env.render_playground(pg))
        .collect::<Result<_, _>>()?;
    let rendered = NonEmpty::from_vec(rendered).ok_or_else(|| {
        CompileError::DiscoveryFailed(DiscoveryError::NoPlaygrounds {
            root: root.to_path_buf(),
        })
    })?;

    // 3. Resolve the build workspace
    let workspace = render_env
        .system()
        .find_workspace(root)
        .map_err(|source| CompileError::WorkspaceResolutionFailed {
            folder: root.to_path_buf(),
            source,
        })?;

    // 4. Build the workspace, once, for the platform of the first page
    let reporter = Reporter::new(env.console);
    let platform = rendered.head().platform();
    let step = format!("Building workspace '{}'", workspace.name());
    info!("building {workspace} for {platform} (cached: {cached})");
    let artifacts = match env.build_tool.compile_workspace(&workspace, platform, cached) {
        Ok(artifacts) => {
            reporter.step(&step, true);
            artifacts
        }
        Err(source) => {
            reporter.failed_step(&step, &source.to_string());
            return Err(CompileError::BuildDependencyFailed {
                workspace: workspace.0.clone(),
                source,
            });
        }
    };

    // 5 + 6. Build pages, one playground per pool thread
    let pool = rayon::ThreadPoolBuilder::new().num_threads(env.jobs.max(1)).build()?;
    let pages: Vec<usize> = pool.install(|| {
        rendered
            .as_slice()
            .par_iter()
            .map(|pg| compile_playground(env, &reporter, &workspace, &artifacts, pg))
            .collect::<Result<_, _>>()
    })?;

    Ok(CompileSummary {
        root: root.to_path_buf(),
        workspace,
        playgrounds: rendered.into_iter().map(|pg| pg.playground).collect(),
        pages: pages.into_iter().sum(),
    })
}

/// Compile the pages of one playground in order, stopping at the first
/// failure. Returns the number of pages compiled.
fn compile_playground(
    env: &Environment<'_>,
    reporter: &Reporter<'_>,
    workspace: &WorkspacePath,
    artifacts: &[PathBuf],
    output: &PlaygroundOutput,
) -> Result<usize, CompileError> {
    let playground_step = format!("Building playground '{}'", output.playground.name());

    for page in &output.pages {
        let page_name = page.page.escaped_title();
        let build = PageBuild {
            rendered: &page.rendered,
            page_name: &page_name,
            playground: &output.playground,
            workspace,
            platform: page.platform,
            artifacts,
        };
        let step = format!("  • Compiling page '{}'", page.page.title());
        if let Err(source) = env.build_tool.compile_page(&build) {
            reporter.failed_nested_step(&step, &source.to_string(), &playground_step);
            return Err(CompileError::ContentInvalid {
                page: page.page.0.clone(),
                source,
            });
        }
        reporter.step(&step, true);
    }

    reporter.step(&playground_step, true);
    Ok(output.pages.len())
}
