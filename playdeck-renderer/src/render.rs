//! Render Engine: pages, playgrounds and whole project folders.
//!
//! Pages of one playground are rendered in parallel, as are playgrounds of a
//! folder. Any failure aborts the batch: a caller gets either every page or
//! an error naming the first page that failed.

use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use playdeck_core::{DiscoveryError, FileSystem, NonEmpty, PagePath, Platform, PlaygroundPath};
use playdeck_discovery::PlaygroundSystem;

use crate::engine::{RenderTarget, Renderer};
use crate::error::{io_err, RenderError};
use crate::syntax::{self, Node};

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub page: PagePath,
    pub ast: Vec<Node>,
    pub rendered: String,
    pub platform: Platform,
}

/// Every page of one playground, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundOutput {
    pub playground: PlaygroundPath,
    pub pages: NonEmpty<RenderOutput>,
}

impl PlaygroundOutput {
    /// Platform of the first page; the one the playground is built for.
    pub fn platform(&self) -> Platform {
        self.pages.head().platform
    }
}

/// Discovery, templates and target for one rendering run.
pub struct RenderEnvironment<'a> {
    system: PlaygroundSystem<'a>,
    renderer: &'a Renderer,
    target: RenderTarget,
}

impl<'a> RenderEnvironment<'a> {
    pub fn new(fs: &'a dyn FileSystem, renderer: &'a Renderer, target: RenderTarget) -> Self {
        RenderEnvironment {
            system: PlaygroundSystem::new(fs),
            renderer,
            target,
        }
    }

    /// Replace the directory names that disqualify a workspace during discovery.
    pub fn with_dependency_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system = self.system.with_dependency_dirs(dirs);
        self
    }

    pub fn system(&self) -> &PlaygroundSystem<'a> {
        &self.system
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Render the page's `Contents.swift`. No other file of the page is read.
    pub fn render_page(
        &self,
        playground: &PlaygroundPath,
        page: &PagePath,
        platform: Platform,
    ) -> Result<RenderOutput, RenderError> {
        let source = page.source();
        let text = self
            .system
            .fs()
            .read_text(&source)
            .map_err(|e| io_err(&source, e))?;
        let ast = syntax::parse(&text).map_err(|source| RenderError::Syntax {
            page: page.0.clone(),
            source,
        })?;
        let rendered = self.renderer.render(playground, page, &ast, &self.target)?;
        debug!("rendered {} ({} nodes)", page, ast.len());

        Ok(RenderOutput {
            page: page.clone(),
            ast,
            rendered,
            platform,
        })
    }

    /// Render every page of `playground` for the platform its descriptor declares.
    pub fn render_playground(&self, playground: &PlaygroundPath) -> Result<PlaygroundOutput, RenderError> {
        let pages = self.system.find_pages(playground)?;
        let platform = self.system.platform(playground)?;

        let outputs: Vec<RenderOutput> = pages
            .as_slice()
            .par_iter()
            .map(|page| self.render_page(playground, page, platform))
            .collect::<Result<_, _>>()?;

        let pages = NonEmpty::from_vec(outputs).ok_or_else(|| DiscoveryError::NoPagesFound {
            playground: playground.0.clone(),
        })?;
        Ok(PlaygroundOutput {
            playground: playground.clone(),
            pages,
        })
    }

    /// Discover every playground under `folder` and render all of them.
    pub fn render_playgrounds(&self, folder: &Path) -> Result<NonEmpty<PlaygroundOutput>, RenderError> {
        let playgrounds = self.system.playgrounds(folder)?;

        let outputs: Vec<PlaygroundOutput> = playgrounds
            .as_slice()
            .par_iter()
            .map(|pg| self.render_playground(pg))
            .collect::<Result<_, _>>()?;

        NonEmpty::from_vec(outputs).ok_or_else(|| {
            RenderError::from(DiscoveryError::NoPlaygrounds {
                root: folder.to_path_buf(),
            })
        })
    }
}
