//! Tera rendering engine: [`RenderTarget`] and [`Renderer`].
//!
//! | Target     | Output                                                       |
//! |------------|--------------------------------------------------------------|
//! | `Compile`  | every code line, hidden regions included; no markup          |
//! | `Markdown` | markup verbatim, code fenced as `swift`; hidden/header dropped |
//! | `Jekyll`   | `Markdown` body under YAML front matter                      |

use std::collections::HashMap;
use std::path::Path;

use tera::Tera;

use playdeck_core::types::slugify;
use playdeck_core::{PagePath, PlaygroundPath};

use crate::context::PageContext;
use crate::error::{io_err, RenderError};
use crate::syntax::{NefCommand, Node};

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const MARKDOWN_TEMPLATE: &str = "markdown.md";
const JEKYLL_TEMPLATE: &str = "jekyll.md";

const TPLS: &[(&str, &str)] = &[
    (MARKDOWN_TEMPLATE, include_str!("templates/markdown.md.tera")),
    (JEKYLL_TEMPLATE, include_str!("templates/jekyll.md.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

/// `<name>.tera` files directly inside `dir`, keyed by `<name>`.
fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut templates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_lowercase()) else {
            continue;
        };
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_owned(), (*content).to_owned()))
        .collect();
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            tracing::debug!("template override: {name}");
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// RenderTarget
// ---------------------------------------------------------------------------

/// What a page is rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Swift source handed to the compiler.
    Compile,
    /// Plain Markdown.
    Markdown,
    /// Markdown for a Jekyll site. Pages are published under
    /// `<permalink>/<playground-slug>/<page-slug>/`.
    Jekyll { permalink: String },
}

impl RenderTarget {
    /// Jekyll target publishing under `/docs/`.
    pub fn jekyll() -> Self {
        RenderTarget::Jekyll {
            permalink: "/docs/".to_owned(),
        }
    }
}

/// `<root>/<playground-slug>/<page-slug>/`
pub fn page_permalink(root: &str, playground: &PlaygroundPath, page: &PagePath) -> String {
    format!(
        "{}/{}/{}/",
        root.trim_end_matches('/'),
        slugify(&playground.name()),
        slugify(&page.title())
    )
}

/// Every code line of the page, hidden regions included, in source order.
pub fn compile_source(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Code { text } => out.push_str(text),
            Node::Nef {
                command: NefCommand::Hidden,
                nodes,
            } => out.push_str(&compile_source(nodes)),
            Node::Markup { .. }
            | Node::Nef {
                command: NefCommand::Header,
                ..
            } => {}
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Tera-based renderer for every [`RenderTarget`].
///
/// Create once and share; rendering only needs `&self`.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_templates(None)
    }

    /// Embedded templates, overridden by any `markdown.md.tera` or
    /// `jekyll.md.tera` found in `user_template_dir`.
    pub fn with_templates(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Renderer {
            tera: build_tera(user_template_dir)?,
        })
    }

    /// Render one parsed page of `playground` for `target`.
    pub fn render(
        &self,
        playground: &PlaygroundPath,
        page: &PagePath,
        nodes: &[Node],
        target: &RenderTarget,
    ) -> Result<String, RenderError> {
        let (template, permalink) = match target {
            RenderTarget::Compile => return Ok(compile_source(nodes)),
            RenderTarget::Markdown => (MARKDOWN_TEMPLATE, None),
            RenderTarget::Jekyll { permalink } => (
                JEKYLL_TEMPLATE,
                Some(page_permalink(permalink, playground, page)),
            ),
        };

        let template_err = |source| RenderError::Template {
            page: page.0.clone(),
            source,
        };
        let ctx = PageContext::from_nodes(&page.title(), nodes, permalink.as_deref());
        let tera_ctx = ctx.to_tera_context().map_err(template_err)?;
        let rendered = self.tera.render(template, &tera_ctx).map_err(template_err)?;
        Ok(format!("{}\n", rendered.trim_end()))
    }

    /// Render a standalone Markdown document (e.g. a site's main page) under
    /// Jekyll front matter with the given `permalink`.
    pub fn render_main_page(&self, markdown: &str, path: &Path, permalink: &str) -> Result<String, RenderError> {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let nodes = [Node::Markup {
            text: markdown.to_owned(),
        }];
        let ctx = PageContext::from_nodes(&title, &nodes, Some(permalink));
        let template_err = |source| RenderError::Template {
            page: path.to_path_buf(),
            source,
        };
        let tera_ctx = ctx.to_tera_context().map_err(template_err)?;
        let rendered = self
            .tera
            .render(JEKYLL_TEMPLATE, &tera_ctx)
            .map_err(template_err)?;
        Ok(format!("{}\n", rendered.trim_end()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
