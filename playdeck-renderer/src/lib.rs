//! # playdeck-renderer
//!
//! Parses playground pages and renders them for compilation or documentation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use playdeck_discovery::LocalFileSystem;
//! use playdeck_renderer::{RenderEnvironment, RenderTarget, Renderer};
//!
//! fn render_docs(project: &Path) {
//!     if let Ok(renderer) = Renderer::new() {
//!         let env = RenderEnvironment::new(&LocalFileSystem, &renderer, RenderTarget::Markdown);
//!         if let Ok(playgrounds) = env.render_playgrounds(project) {
//!             for pg in &playgrounds {
//!                 for page in &pg.pages {
//!                     println!("{}: {} bytes", page.page, page.rendered.len());
//!                 }
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod render;
pub mod syntax;

pub use context::PageContext;
pub use engine::{RenderTarget, Renderer};
pub use error::RenderError;
pub use render::{PlaygroundOutput, RenderEnvironment, RenderOutput};
pub use syntax::{NefCommand, Node, SyntaxError};
