//! # playdeck-compiler
//!
//! Build and documentation pipelines over discovered playgrounds.
//!
//! Call [`compile`] to render every page for compilation and build it against
//! its workspace, or [`docs::markdown`] / [`docs::jekyll`] to write
//! documentation. [`XcodeBuildTool`] is the real build tool; tests pass fakes
//! through [`Environment`].

pub mod docs;
pub mod environment;
pub mod error;
pub mod pipeline;
pub mod reporter;
pub mod writer;
pub mod xcode;

pub use docs::DocsSummary;
pub use environment::Environment;
pub use error::CompileError;
pub use pipeline::{compile, CompileSummary};
pub use reporter::Reporter;
pub use writer::WriteResult;
pub use xcode::XcodeBuildTool;
