//! [`FileSystem`] backed by the local disk.

use std::io;
use std::path::{Path, PathBuf};

use playdeck_core::FileSystem;
use walkdir::{DirEntry, WalkDir};

/// Local-disk filesystem. Stateless; share one instance freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn enumerate(&self, root: &Path, skip_hidden: bool) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !(skip_hidden && is_hidden(e)));
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            paths.push(entry.into_path());
        }
        Ok(paths)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
