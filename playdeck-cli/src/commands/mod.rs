//! Subcommands. Each owns a clap `Args` struct with a `run(self)` method.

pub mod clean;
pub mod compile;
pub mod jekyll;
pub mod markdown;
pub mod page;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use playdeck_compiler::{DocsSummary, Environment, WriteResult, XcodeBuildTool};
use playdeck_core::{config, Config, Console};
use playdeck_discovery::LocalFileSystem;
use playdeck_renderer::Renderer;

/// Configuration and collaborators shared by the project-level commands.
pub struct Session {
    pub project: PathBuf,
    pub config: Config,
    renderer: Renderer,
    tool: XcodeBuildTool,
}

impl Session {
    pub fn open(project: &Path, templates: Option<&Path>) -> Result<Self> {
        if !project.is_dir() {
            bail!("project folder '{}' does not exist", project.display());
        }
        let config = config::load(project)
            .with_context(|| format!("failed to load configuration for '{}'", project.display()))?;
        let renderer = Renderer::with_templates(templates).context("failed to load templates")?;
        let tool = XcodeBuildTool::from_config(&config, project);
        Ok(Session {
            project: project.to_path_buf(),
            config,
            renderer,
            tool,
        })
    }

    pub fn build_tool(&self) -> &XcodeBuildTool {
        &self.tool
    }

    pub fn env<'a>(&'a self, console: &'a dyn Console) -> Environment<'a> {
        Environment::new(&LocalFileSystem, &self.tool, console, &self.renderer).configured(&self.config)
    }
}

/// Summary line plus one line per file.
pub fn print_writes(label: &str, summary: &DocsSummary, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let changed = if dry_run {
        summary.writes.len() - summary.unchanged()
    } else {
        summary.written()
    };

    println!(
        "{prefix}✓ {label} in '{}' ({changed} written, {} unchanged)",
        summary.output.display(),
        summary.unchanged()
    );
    for r in &summary.writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
