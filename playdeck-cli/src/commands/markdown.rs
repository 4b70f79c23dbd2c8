//! `playdeck markdown`: render playground pages as Markdown files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use playdeck_compiler::docs;

use crate::commands::{print_writes, Session};
use crate::console::TerminalConsole;

/// Arguments for `playdeck markdown`.
#[derive(Args, Debug)]
pub struct MarkdownArgs {
    /// Project folder holding the Xcode workspace.
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// Directory the Markdown files are written to.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Directory with `markdown.md.tera` overriding the built-in template.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl MarkdownArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open(&self.project, self.templates.as_deref())?;
        let env = session.env(&TerminalConsole);
        let summary = docs::markdown(&env, &session.project, &self.output, self.dry_run)
            .with_context(|| format!("markdown failed for '{}'", session.project.display()))?;
        print_writes("rendered Markdown", &summary, self.dry_run);
        Ok(())
    }
}
