//! Domain types for playground projects.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! The on-disk naming conventions of Xcode workspaces and playgrounds live here
//! as constants so discovery, rendering and the build tool agree on them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Conventions
// ---------------------------------------------------------------------------

/// Extension of the project file inside every `*.xcodeproj` bundle.
pub const PROJECT_FILE_EXTENSION: &str = "pbxproj";
/// Extension of a workspace bundle.
pub const WORKSPACE_EXTENSION: &str = "xcworkspace";
/// Descriptor file inside a workspace bundle.
pub const WORKSPACE_DESCRIPTOR: &str = "contents.xcworkspacedata";
/// Descriptor file inside a playground bundle.
pub const PLAYGROUND_DESCRIPTOR: &str = "contents.xcplayground";
/// Directory holding the pages of a playground.
pub const PAGES_DIR: &str = "Pages";
/// Extension of a page bundle.
pub const PAGE_EXTENSION: &str = "xcplaygroundpage";
/// Primary source file of a page bundle.
pub const PAGE_SOURCE: &str = "Contents.swift";
/// Vendored-package folders that are never valid discovery roots.
pub const DEFAULT_DEPENDENCY_DIRS: &[&str] = &["Pods", "Carthage"];

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A `*.xcworkspace` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspacePath(pub PathBuf);

impl WorkspacePath {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// `<workspace>/contents.xcworkspacedata`
    pub fn descriptor(&self) -> PathBuf {
        self.0.join(WORKSPACE_DESCRIPTOR)
    }

    /// Directory that `group:` references in the descriptor are relative to.
    pub fn base_dir(&self) -> &Path {
        self.0.parent().unwrap_or(&self.0)
    }

    /// Bundle name without extension, e.g. `App` for `App.xcworkspace`.
    pub fn name(&self) -> String {
        stem(&self.0)
    }
}

/// A `*.playground` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaygroundPath(pub PathBuf);

impl PlaygroundPath {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// `<playground>/contents.xcplayground`
    pub fn descriptor(&self) -> PathBuf {
        self.0.join(PLAYGROUND_DESCRIPTOR)
    }

    /// `<playground>/Pages`
    pub fn pages_dir(&self) -> PathBuf {
        self.0.join(PAGES_DIR)
    }

    /// `<playground>/Pages/<name>.xcplaygroundpage`
    pub fn page(&self, name: &str) -> PagePath {
        PagePath(self.pages_dir().join(format!("{name}.{PAGE_EXTENSION}")))
    }

    pub fn name(&self) -> String {
        stem(&self.0)
    }
}

/// A `*.xcplaygroundpage` bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PagePath(pub PathBuf);

impl PagePath {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// `<page>/Contents.swift`
    pub fn source(&self) -> PathBuf {
        self.0.join(PAGE_SOURCE)
    }

    /// Human title: the bundle name without extension.
    pub fn title(&self) -> String {
        stem(&self.0)
    }

    /// Title reduced to `[A-Za-z0-9_-]`, safe to use as a file name.
    pub fn escaped_title(&self) -> String {
        self.title()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

macro_rules! path_newtype_impls {
    ($($ty:ident),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.display().fmt(f)
            }
        }

        impl From<PathBuf> for $ty {
            fn from(p: PathBuf) -> Self {
                Self(p)
            }
        }

        impl From<&Path> for $ty {
            fn from(p: &Path) -> Self {
                Self(p.to_path_buf())
            }
        }

        impl AsRef<Path> for $ty {
            fn as_ref(&self) -> &Path {
                &self.0
            }
        }
    )*};
}

path_newtype_impls!(WorkspacePath, PlaygroundPath, PagePath);

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lowercase, hyphen-separated form of `s` for URLs and directory names.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Target platform declared by a playground descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Macos,
    Tvos,
}

impl Platform {
    /// SDK name understood by `xcodebuild -sdk` and `xcrun --sdk`.
    pub fn sdk(&self) -> &'static str {
        match self {
            Platform::Ios => "iphonesimulator",
            Platform::Macos => "macosx",
            Platform::Tvos => "appletvsimulator",
        }
    }

    /// Suffix of the `Build/Products/<configuration>` directory for this platform.
    pub fn products_suffix(&self) -> &'static str {
        match self {
            Platform::Ios => "-iphonesimulator",
            Platform::Macos => "",
            Platform::Tvos => "-appletvsimulator",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Macos => write!(f, "macos"),
            Platform::Tvos => write!(f, "tvos"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "macos" | "osx" => Ok(Platform::Macos),
            "tvos" => Ok(Platform::Tvos),
            other => Err(format!(
                "unknown platform '{other}'; expected: ios, macos, tvos"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
