use std::fs;
use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::io::store::{FileStore, StoreError};
use crate::model::config::AppConfig;

/// Directory holding the store, config and lock file
pub const WORKSPACE_DIR: &str = ".pmlite";

/// Error type for workspace discovery and loading
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a pmlite workspace: no {WORKSPACE_DIR}/ directory found (run `pm init`)")]
    NotAWorkspace,
    #[error("pmlite workspace already exists in {0}")]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// An opened workspace: its location, configuration and store
#[derive(Debug)]
pub struct Workspace {
    /// Directory containing `.pmlite/`
    pub root: PathBuf,
    /// Path to the `.pmlite/` directory
    pub dir: PathBuf,
    pub config: AppConfig,
    pub store: FileStore,
}

/// Walk up from `start` looking for a `.pmlite/` directory.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(WORKSPACE_DIR).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotAWorkspace);
        }
    }
}

/// Open the workspace rooted at `root`.
pub fn open_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let dir = root.join(WORKSPACE_DIR);
    if !dir.is_dir() {
        return Err(WorkspaceError::NotAWorkspace);
    }
    let (config, _doc) = config_io::read_config(&dir)?;
    let store = FileStore::open(&dir)?;
    tracing::debug!(root = %root.display(), "opened workspace");
    Ok(Workspace {
        root: root.to_path_buf(),
        dir,
        config,
        store,
    })
}

/// Create `.pmlite/` with a commented config file. With `force`, an
/// existing config is rewritten; the store is never touched.
pub fn init_workspace(root: &Path, force: bool) -> Result<PathBuf, WorkspaceError> {
    let dir = root.join(WORKSPACE_DIR);
    if dir.is_dir() && !force {
        return Err(WorkspaceError::AlreadyExists(root.to_path_buf()));
    }
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(config_io::CONFIG_FILE), config_io::CONFIG_TEMPLATE)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        init_workspace(tmp.path(), false).unwrap();
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        assert_eq!(discover_workspace(&sub).unwrap(), tmp.path());
    }

    #[test]
    fn test_discover_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_workspace(tmp.path()),
            Err(WorkspaceError::NotAWorkspace)
        ));
    }

    #[test]
    fn test_init_twice_requires_force() {
        let tmp = TempDir::new().unwrap();
        init_workspace(tmp.path(), false).unwrap();
        assert!(init_workspace(tmp.path(), false).is_err());
        assert!(init_workspace(tmp.path(), true).is_ok());
    }

    #[test]
    fn test_open_reads_template_config() {
        let tmp = TempDir::new().unwrap();
        init_workspace(tmp.path(), false).unwrap();
        let ws = open_workspace(tmp.path()).unwrap();
        assert_eq!(ws.config, AppConfig::default());
        assert_eq!(ws.dir, tmp.path().join(WORKSPACE_DIR));
    }
}
