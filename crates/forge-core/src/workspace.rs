//! Lifecycle of the target directory and the temporary archive file.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ScaffoldError;

/// Owns the directory the temporary archive is staged in (the invocation's
/// working directory in normal runs, a sandbox in tests).
#[derive(Debug, Clone)]
pub struct Workspace {
    work_dir: PathBuf,
}

impl Workspace {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Workspace rooted at the current working directory.
    pub fn current() -> Result<Self> {
        Ok(Self::new(
            env::current_dir().context("cannot determine current directory")?,
        ))
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The sole precondition gate: fails if `target` exists (as a file or
    /// directory), is not the current working directory, and `force` is
    /// unset. Runs before any network or disk I/O.
    pub fn ensure_absent(&self, target: &Path, force: bool) -> Result<(), ScaffoldError> {
        if force || !target.exists() {
            return Ok(());
        }
        // Scaffolding into the directory we are standing in is allowed.
        if let (Ok(cwd), Ok(resolved)) = (
            env::current_dir().and_then(fs::canonicalize),
            fs::canonicalize(target),
        ) {
            if cwd == resolved {
                return Ok(());
            }
        }
        Err(ScaffoldError::AlreadyExists(target.to_path_buf()))
    }

    /// Reserves a fresh, unique archive path under the work dir. The name
    /// carries the current time plus a random token and is never reused.
    pub fn archive_path(&self) -> Result<PathBuf, ScaffoldError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let (_file, path) = tempfile::Builder::new()
            .prefix(&format!("forge_{}_", millis))
            .suffix(".zip")
            .tempfile_in(&self.work_dir)
            .with_context(|| format!("cannot create archive file in {}", self.work_dir.display()))
            .map_err(ScaffoldError::Workspace)?
            .keep()
            .context("cannot persist archive file")
            .map_err(ScaffoldError::Workspace)?;

        Ok(path)
    }

    /// Best-effort removal of the temporary archive. The archive is a
    /// disposable artifact; a leftover never compromises the scaffolded
    /// project, so failures are logged and swallowed.
    pub fn cleanup_archive(&self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Ok(metadata) = fs::metadata(path) {
            let mut permissions = metadata.permissions();
            #[allow(clippy::permissions_set_readonly_false)]
            permissions.set_readonly(false);
            let _ = fs::set_permissions(path, permissions);
        }
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("removed temporary archive {}", path.display()),
            Err(e) => tracing::warn!(
                "could not remove temporary archive {}: {}",
                path.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ensure_absent_passes_for_missing_target() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        assert!(ws.ensure_absent(&dir.path().join("fresh"), false).is_ok());
    }

    #[test]
    fn ensure_absent_rejects_existing_directory() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        let err = ws.ensure_absent(&target, false).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
    }

    #[test]
    fn ensure_absent_rejects_existing_file() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let target = dir.path().join("taken");
        fs::write(&target, b"occupied").unwrap();

        let err = ws.ensure_absent(&target, false).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(_)));
    }

    #[test]
    fn ensure_absent_force_bypasses_the_check() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        assert!(ws.ensure_absent(&target, true).is_ok());
    }

    #[test]
    fn ensure_absent_allows_the_current_directory() {
        let ws = Workspace::current().unwrap();
        let cwd = env::current_dir().unwrap();
        assert!(ws.ensure_absent(&cwd, false).is_ok());
    }

    #[test]
    fn archive_paths_are_unique_and_created() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());

        let a = ws.archive_path().unwrap();
        let b = ws.archive_path().unwrap();
        assert_ne!(a, b);
        assert!(a.exists());
        assert!(b.exists());
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("forge_"));
        assert!(name.ends_with(".zip"));
    }

    #[test]
    fn cleanup_archive_removes_read_only_files() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let path = ws.archive_path().unwrap();

        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        ws.cleanup_archive(&path);
        assert!(!path.exists());
    }

    #[test]
    fn cleanup_archive_ignores_missing_files() {
        let dir = tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        ws.cleanup_archive(&dir.path().join("never-created.zip"));
    }
}
