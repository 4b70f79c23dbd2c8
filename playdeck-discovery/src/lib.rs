//! Playground discovery for `playdeck-discovery`.
//!
//! [`PlaygroundSystem`] walks a project directory over an injected
//! [`FileSystem`](playdeck_core::FileSystem), finds the Xcode workspaces in
//! it, follows their descriptors to playgrounds and pages, and rejects broken
//! links. [`LocalFileSystem`] is the on-disk implementation.

pub mod extract;
mod fs;
mod system;

pub use fs::LocalFileSystem;
pub use system::PlaygroundSystem;
