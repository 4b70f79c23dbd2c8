//! `playdeck jekyll`: render playground pages into a Jekyll docs tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use playdeck_compiler::docs;

use crate::commands::{print_writes, Session};
use crate::console::TerminalConsole;

/// Arguments for `playdeck jekyll`.
#[derive(Args, Debug)]
pub struct JekyllArgs {
    /// Project folder holding the Xcode workspace.
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// Root of the Jekyll site; pages land in `<output>/docs/`.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Markdown file published as the docs index (`/docs/`).
    #[arg(long)]
    pub main_page: Option<PathBuf>,

    /// Directory with `jekyll.md.tera` / `markdown.md.tera` overriding the built-in templates.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl JekyllArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open(&self.project, self.templates.as_deref())?;
        let env = session.env(&TerminalConsole);
        let summary = docs::jekyll(
            &env,
            &session.project,
            &self.output,
            self.main_page.as_deref(),
            self.dry_run,
        )
        .with_context(|| format!("jekyll failed for '{}'", session.project.display()))?;
        print_writes("rendered Jekyll docs", &summary, self.dry_run);
        Ok(())
    }
}
