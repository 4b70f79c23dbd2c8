//! Atomic, hash-gated file writer for generated documentation.
//!
//! ## `atomic_write`
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 the content and the file already on disk, if any.
//! 3. Equal digests → `Unchanged`, the file is not touched.
//! 4. Write `<path>.playdeck.tmp`, then rename over `<path>` (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, CompileError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: its content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

fn existing_digest(path: &Path) -> Result<Option<String>, CompileError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(digest(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Atomically write `content` to `path` unless the file already holds it.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, CompileError> {
    let tmp = PathBuf::from(format!("{}.playdeck.tmp", path.display()));
    atomic_write_with_tmp(path, content, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, CompileError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    if existing_digest(path)?.as_deref() == Some(digest(content.as_bytes()).as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Intro.md");
        let result = atomic_write(&path, "hello", false).unwrap();
        assert_eq!(result, WriteResult::Written { path: path.clone() });
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn same_content_is_not_rewritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.md");
        atomic_write(&path, "same content", false).unwrap();

        let old = FileTime::from_unix_time(1_000_000, 0);
        filetime::set_file_mtime(&path, old).unwrap();

        let result = atomic_write(&path, "same content", false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
        let mtime = FileTime::from_last_modification_time(&fs::metadata(&path).unwrap());
        assert_eq!(mtime, old, "unchanged file must not be touched");
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.md");
        atomic_write(&path, "v1", false).unwrap();
        let result = atomic_write(&path, "v2", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.md");
        let result = atomic_write(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn dry_run_reports_unchanged_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.md");
        fs::write(&path, "content").unwrap();
        let result = atomic_write(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.md");
        atomic_write(&path, "data", false).unwrap();
        let tmp_path = PathBuf::from(format!("{}.playdeck.tmp", path.display()));
        assert!(!tmp_path.exists(), ".playdeck.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docs").join("intro").join("README.md");
        atomic_write(&path, "content", false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn crlf_and_lf_content_share_the_same_hash() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("normalize.md");

        let first = atomic_write(&path, "line1\r\nline2\r\n", false).unwrap();
        assert!(matches!(first, WriteResult::Written { .. }));

        let second = atomic_write(&path, "line1\nline2\n", false).unwrap();
        assert!(matches!(second, WriteResult::Unchanged { .. }));

        assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nline2\n");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("page.md");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("page.md.playdeck.tmp");

        let result = atomic_write_with_tmp(&path, "new content", false, &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename was refused.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp_path.exists(), ".playdeck.tmp should be cleaned up");
        }
    }
}
