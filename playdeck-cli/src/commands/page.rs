//! `playdeck page`: render one page source to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use playdeck_core::{PagePath, PlaygroundPath};
use playdeck_renderer::{syntax, RenderTarget, Renderer};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    Compile,
    Markdown,
    Jekyll,
}

impl From<TargetArg> for RenderTarget {
    fn from(t: TargetArg) -> Self {
        match t {
            TargetArg::Compile => RenderTarget::Compile,
            TargetArg::Markdown => RenderTarget::Markdown,
            TargetArg::Jekyll => RenderTarget::jekyll(),
        }
    }
}

/// Arguments for `playdeck page`.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// `Contents.swift` of a page bundle.
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = TargetArg::Markdown)]
    pub target: TargetArg,

    /// Print the parsed structure instead of the rendered page.
    #[arg(long)]
    pub ast: bool,

    /// Directory with template overrides.
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

impl PageArgs {
    pub fn run(self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read '{}'", self.file.display()))?;
        let nodes = syntax::parse(&text)
            .with_context(|| format!("invalid page '{}'", self.file.display()))?;

        if self.ast {
            print!("{}", syntax::describe(&nodes));
            return Ok(());
        }

        // <playground>/Pages/<page>.xcplaygroundpage/Contents.swift
        let file = std::fs::canonicalize(&self.file)
            .with_context(|| format!("failed to resolve '{}'", self.file.display()))?;
        let page_dir = file.parent().unwrap_or(Path::new(""));
        let page = PagePath::from(page_dir);
        let playground = PlaygroundPath::from(
            page_dir
                .parent()
                .and_then(Path::parent)
                .unwrap_or(Path::new("")),
        );

        let renderer = Renderer::with_templates(self.templates.as_deref())
            .context("failed to load templates")?;
        let rendered = renderer
            .render(&playground, &page, &nodes, &self.target.into())
            .with_context(|| format!("failed to render '{}'", self.file.display()))?;
        print!("{rendered}");
        Ok(())
    }
}
