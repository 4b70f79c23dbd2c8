//! `playdeck clean`: drop everything `compile` built.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use crate::commands::Session;

/// Arguments for `playdeck clean`.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Project folder holding the Xcode workspace.
    #[arg(default_value = ".")]
    pub project: PathBuf,
}

impl CleanArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open(&self.project, None)?;
        let tool = session.build_tool();
        if let (Ok(project), Ok(build)) = (
            session.project.canonicalize(),
            tool.build_dir().canonicalize(),
        ) {
            if project.starts_with(&build) {
                bail!(
                    "refusing to clean '{}': it contains the project",
                    build.display()
                );
            }
        }
        let removed = tool
            .clean()
            .with_context(|| format!("clean failed for '{}'", session.project.display()))?;

        if removed {
            println!("{} removed '{}'", "✓".green(), tool.build_dir().display());
        } else {
            println!("· nothing to clean in '{}'", tool.build_dir().display());
        }
        Ok(())
    }
}
