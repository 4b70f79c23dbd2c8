//! Playground System: workspaces → playgrounds → pages.
//!
//! Every operation validates as it goes: nothing found is an error, and so is
//! a reference to something that is not on disk. A malformed project is
//! rejected here, before any rendering or build work starts.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use playdeck_core::types::{
    DEFAULT_DEPENDENCY_DIRS, PAGE_EXTENSION, PROJECT_FILE_EXTENSION, WORKSPACE_EXTENSION,
};
use playdeck_core::{
    DiscoveryError, FileSystem, NonEmpty, PagePath, Platform, PlaygroundPath, WorkspacePath,
};

use crate::extract;

/// Discovery over an injected [`FileSystem`].
pub struct PlaygroundSystem<'a> {
    fs: &'a dyn FileSystem,
    dependency_dirs: Vec<String>,
}

impl<'a> PlaygroundSystem<'a> {
    /// Discovery that excludes the default dependency folders (`Pods`, `Carthage`).
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        PlaygroundSystem {
            fs,
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
        }
    }

    /// Replace the set of directory names that disqualify a workspace.
    pub fn with_dependency_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    // -----------------------------------------------------------------------
    // Workspaces
    // -----------------------------------------------------------------------

    /// Every workspace under `root` that sits next to an Xcode project and is
    /// not inside a dependency folder.
    pub fn find_workspaces(&self, root: &Path) -> Result<NonEmpty<WorkspacePath>, DiscoveryError> {
        let entries = self
            .fs
            .enumerate(root, true)
            .map_err(|e| DiscoveryError::io(root, e))?;

        let mut seen = HashSet::new();
        let mut workspaces = Vec::new();
        for entry in entries {
            if entry.extension().and_then(|e| e.to_str()) != Some(PROJECT_FILE_EXTENSION) {
                continue;
            }
            let Some(xcodeproj) = entry.parent() else { continue };
            let workspace = xcodeproj.with_extension(WORKSPACE_EXTENSION);
            if self.is_dependency(&workspace) {
                debug!("skipping dependency workspace: {}", workspace.display());
                continue;
            }
            if !self.fs.exists(&workspace) {
                debug!("no workspace next to {}", xcodeproj.display());
                continue;
            }
            if seen.insert(workspace.clone()) {
                workspaces.push(WorkspacePath(workspace));
            }
        }

        NonEmpty::from_vec(workspaces).ok_or_else(|| DiscoveryError::NoWorkspaces {
            root: root.to_path_buf(),
        })
    }

    /// The single workspace under `root`; anything other than exactly one is
    /// an error.
    pub fn find_workspace(&self, root: &Path) -> Result<WorkspacePath, DiscoveryError> {
        let workspaces = self.find_workspaces(root)?;
        if workspaces.len() != 1 {
            return Err(DiscoveryError::AmbiguousWorkspace {
                root: root.to_path_buf(),
                found: workspaces.len(),
            });
        }
        Ok(workspaces.into_head())
    }

    fn is_dependency(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(name) => self
                .dependency_dirs
                .iter()
                .any(|d| name.to_str() == Some(d.as_str())),
            _ => false,
        })
    }

    // -----------------------------------------------------------------------
    // Playgrounds
    // -----------------------------------------------------------------------

    /// Playgrounds referenced by `workspaces`.
    ///
    /// Workspaces are read in parallel. The order of playgrounds within one
    /// workspace follows its descriptor; the order across workspaces is not
    /// significant. A single unresolved reference fails the whole call.
    pub fn find_playgrounds(
        &self,
        workspaces: &NonEmpty<WorkspacePath>,
    ) -> Result<NonEmpty<PlaygroundPath>, DiscoveryError> {
        let per_workspace: Vec<Vec<PlaygroundPath>> = workspaces
            .as_slice()
            .par_iter()
            .map(|ws| self.read_playgrounds(ws))
            .collect::<Result<_, _>>()?;

        let playgrounds: Vec<PlaygroundPath> = per_workspace.into_iter().flatten().collect();
        NonEmpty::from_vec(playgrounds).ok_or_else(|| DiscoveryError::NoPlaygrounds {
            root: workspaces.head().base_dir().to_path_buf(),
        })
    }

    fn read_playgrounds(&self, workspace: &WorkspacePath) -> Result<Vec<PlaygroundPath>, DiscoveryError> {
        let descriptor = workspace.descriptor();
        let text = self
            .fs
            .read_text(&descriptor)
            .map_err(|e| DiscoveryError::io(&descriptor, e))?;

        let playgrounds: Vec<PlaygroundPath> = extract::playground_refs(&text)
            .into_iter()
            .map(|rel| PlaygroundPath(workspace.base_dir().join(rel)))
            .collect();

        if let Some(missing) = playgrounds.iter().find(|p| !self.fs.exists(p.path())) {
            return Err(DiscoveryError::BrokenPlaygroundLink {
                workspace: workspace.0.clone(),
                playground: missing.0.clone(),
            });
        }
        debug!(
            "{} playground(s) linked from {}",
            playgrounds.len(),
            workspace
        );
        Ok(playgrounds)
    }

    /// [`find_workspaces`](Self::find_workspaces) followed by
    /// [`find_playgrounds`](Self::find_playgrounds).
    pub fn playgrounds(&self, root: &Path) -> Result<NonEmpty<PlaygroundPath>, DiscoveryError> {
        let workspaces = self.find_workspaces(root)?;
        self.find_playgrounds(&workspaces)
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Pages of `playground`, in descriptor order.
    ///
    /// When the descriptor lists no page, a `Pages/` directory with exactly
    /// one page bundle stands in for it.
    pub fn find_pages(&self, playground: &PlaygroundPath) -> Result<NonEmpty<PagePath>, DiscoveryError> {
        let text = self.descriptor_text(playground)?;
        let names = extract::page_names(&text);

        let pages: Vec<PagePath> = if names.is_empty() {
            vec![self.sole_page(playground)?]
        } else {
            names.iter().map(|name| playground.page(name)).collect()
        };

        if let Some(missing) = pages.iter().find(|p| !self.fs.exists(p.path())) {
            return Err(DiscoveryError::BrokenPageLink {
                playground: playground.0.clone(),
                page: missing.0.clone(),
            });
        }

        NonEmpty::from_vec(pages).ok_or_else(|| DiscoveryError::NoPagesFound {
            playground: playground.0.clone(),
        })
    }

    fn sole_page(&self, playground: &PlaygroundPath) -> Result<PagePath, DiscoveryError> {
        let pages_dir = playground.pages_dir();
        let no_pages = || DiscoveryError::NoPagesFound {
            playground: playground.0.clone(),
        };
        if !self.fs.exists(&pages_dir) {
            return Err(no_pages());
        }

        let mut candidates: Vec<String> = self
            .fs
            .list_directory(&pages_dir)
            .map_err(|e| DiscoveryError::io(&pages_dir, e))?
            .into_iter()
            .filter(|name| {
                !name.starts_with('.')
                    && Path::new(name).extension().and_then(|e| e.to_str()) == Some(PAGE_EXTENSION)
            })
            .collect();

        match candidates.len() {
            0 => Err(no_pages()),
            1 => {
                let name = candidates.remove(0);
                debug!("{} lists no pages, using {name}", playground);
                Ok(PagePath(pages_dir.join(name)))
            }
            found => Err(DiscoveryError::AmbiguousPages {
                playground: playground.0.clone(),
                found,
            }),
        }
    }

    /// Target platform declared by the playground descriptor.
    ///
    /// A missing or unrecognised value falls back to [`Platform::default`].
    pub fn platform(&self, playground: &PlaygroundPath) -> Result<Platform, DiscoveryError> {
        let text = self.descriptor_text(playground)?;
        let Some(raw) = extract::target_platform(&text) else {
            return Ok(Platform::default());
        };
        Ok(raw.parse().unwrap_or_else(|e: String| {
            warn!("{}: {e}; assuming {}", playground, Platform::default());
            Platform::default()
        }))
    }

    fn descriptor_text(&self, playground: &PlaygroundPath) -> Result<String, DiscoveryError> {
        let descriptor: PathBuf = playground.descriptor();
        self.fs
            .read_text(&descriptor)
            .map_err(|e| DiscoveryError::io(&descriptor, e))
    }
}
