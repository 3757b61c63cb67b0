//! File-backed store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{CartStore, StoreError, validate_key};

/// Store keeping one `<key>.json` file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl CartStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let staging = self.root.join(format!(".{key}.json.tmp"));

        fs::create_dir_all(&self.root)?;
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        debug!(path = %path.display(), bytes = value.len(), "wrote store entry");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_loads_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.load("cart")?, None);

        Ok(())
    }

    #[test]
    fn save_creates_root_and_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new(&root);

        assert_eq!(store.root(), root.as_path());

        store.save("cart", r#"[{"id":"1"}]"#)?;

        assert!(root.join("cart.json").exists());
        assert!(!root.join(".cart.json.tmp").exists());
        assert_eq!(
            FileStore::new(&root).load("cart")?.as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );

        Ok(())
    }

    #[test]
    fn rejects_traversal_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.save("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            store.load("../escape"),
            Err(StoreError::InvalidKey(_))
        ));

        Ok(())
    }
}
