//! `playdeck compile`: build every playground page against its workspace.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use playdeck_compiler::compile;

use crate::commands::Session;
use crate::console::TerminalConsole;

/// Arguments for `playdeck compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Project folder holding the Xcode workspace.
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// Reuse an existing workspace build when there is one.
    #[arg(long)]
    pub cached: bool,

    /// Playgrounds compiled at the same time (overrides `jobs` in playdeck.yaml).
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,
}

impl CompileArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open(&self.project, None)?;
        let cached = self.cached || session.config.cached;
        let mut env = session.env(&TerminalConsole);
        if let Some(jobs) = self.jobs {
            env = env.with_jobs(jobs);
        }

        let summary = compile(&env, &session.project, cached)
            .with_context(|| format!("compile failed for '{}'", session.project.display()))?;

        println!(
            "{} compiled {} page(s) in {} playground(s) of '{}'",
            "✓".green(),
            summary.pages,
            summary.playgrounds.len(),
            summary.root.display()
        );
        Ok(())
    }
}
