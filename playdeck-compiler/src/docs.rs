//! Documentation pipelines: Markdown files and a Jekyll site.
//!
//! ```text
//! markdown:  <output>/<playground>/<page>.md
//! jekyll:    <output>/docs/<playground-slug>/<page-slug>/README.md
//!            <output>/docs/README.md                     (main page)
//! ```
//!
//! Every page is rendered before the first file is written, so a render
//! failure leaves the output directory untouched. The same holds when two
//! pages map to one output file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use playdeck_core::types::slugify;
use playdeck_core::PagePath;
use playdeck_renderer::{PlaygroundOutput, RenderTarget};

use crate::environment::Environment;
use crate::error::{io_err, CompileError};
use crate::reporter::Reporter;
use crate::writer::{atomic_write, WriteResult};

/// Directory and permalink root of the Jekyll docs.
pub const JEKYLL_DOCS_DIR: &str = "docs";
pub const JEKYLL_PERMALINK: &str = "/docs/";

/// What a documentation run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSummary {
    pub output: PathBuf,
    pub writes: Vec<WriteResult>,
}

impl DocsSummary {
    pub fn written(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteResult::Written { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteResult::Unchanged { .. }))
            .count()
    }
}

/// A rendered file waiting to be written.
struct Pending {
    playground: String,
    source: PathBuf,
    path: PathBuf,
    content: String,
}

/// Render every playground under `project` to Markdown in `output`.
pub fn markdown(
    env: &Environment<'_>,
    project: &Path,
    output: &Path,
    dry_run: bool,
) -> Result<DocsSummary, CompileError> {
    let rendered = env
        .render_environment(RenderTarget::Markdown)
        .render_playgrounds(project)?;

    let pending: Vec<Pending> = rendered
        .iter()
        .flat_map(|pg| {
            pending_pages(pg, move |page| {
                output
                    .join(pg.playground.name())
                    .join(format!("{}.md", page.escaped_title()))
            })
        })
        .collect();

    write_all(env, output, pending, dry_run)
}

/// Render every playground under `project` as a Jekyll docs tree in `output`.
///
/// `main_page`, when given, becomes the docs index.
pub fn jekyll(
    env: &Environment<'_>,
    project: &Path,
    output: &Path,
    main_page: Option<&Path>,
    dry_run: bool,
) -> Result<DocsSummary, CompileError> {
    let target = RenderTarget::Jekyll {
        permalink: JEKYLL_PERMALINK.to_owned(),
    };
    let rendered = env.render_environment(target).render_playgrounds(project)?;
    let docs = output.join(JEKYLL_DOCS_DIR);

    let mut pending: Vec<Pending> = rendered
        .iter()
        .flat_map(|pg| {
            let pg_dir = docs.join(slugify(&pg.playground.name()));
            pending_pages(pg, move |page| {
                pg_dir.join(slugify(&page.title())).join("README.md")
            })
        })
        .collect();

    if let Some(main) = main_page {
        let text = env.fs.read_text(main).map_err(|e| io_err(main, e))?;
        let content = env.renderer.render_main_page(&text, main, JEKYLL_PERMALINK)?;
        pending.push(Pending {
            playground: String::new(),
            source: main.to_path_buf(),
            path: docs.join("README.md"),
            content,
        });
    }

    write_all(env, output, pending, dry_run)
}

fn pending_pages<'p>(
    pg: &'p PlaygroundOutput,
    path_for: impl Fn(&PagePath) -> PathBuf + 'p,
) -> impl Iterator<Item = Pending> + 'p {
    let name = pg.playground.name();
    pg.pages.iter().map(move |page| Pending {
        playground: name.clone(),
        source: page.page.0.clone(),
        path: path_for(&page.page),
        content: page.rendered.clone(),
    })
}

fn write_all(
    env: &Environment<'_>,
    output: &Path,
    pending: Vec<Pending>,
    dry_run: bool,
) -> Result<DocsSummary, CompileError> {
    check_collisions(&pending)?;

    let reporter = Reporter::new(env.console);
    let mut writes = Vec::with_capacity(pending.len());
    let mut current: Option<String> = None;

    for file in pending {
        if current.as_deref() != Some(file.playground.as_str()) {
            if let Some(done) = current.take().filter(|n| !n.is_empty()) {
                reporter.step(&format!("Rendered playground '{done}'"), true);
            }
            current = Some(file.playground.clone());
        }
        match atomic_write(&file.path, &file.content, dry_run) {
            Ok(result) => writes.push(result),
            Err(e) => {
                reporter.failed_step(&format!("Writing '{}'", file.path.display()), &e.to_string());
                return Err(e);
            }
        }
    }
    if let Some(done) = current.filter(|n| !n.is_empty()) {
        reporter.step(&format!("Rendered playground '{done}'"), true);
    }

    Ok(DocsSummary {
        output: output.to_path_buf(),
        writes,
    })
}

/// Escaping and slugs are lossy, so distinct pages can share an output path.
fn check_collisions(pending: &[Pending]) -> Result<(), CompileError> {
    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(pending.len());
    for file in pending {
        if let Some(first) = seen.insert(&file.path, &file.source) {
            return Err(CompileError::OutputCollision {
                path: file.path.clone(),
                first: first.to_path_buf(),
                second: file.source.clone(),
            });
        }
    }
    Ok(())
}
