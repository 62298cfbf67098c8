use super::SequenceStore;
use crate::error::{NotecraftError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILENAME: &str = "store.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotecraftError::Io)?;
        }
        Ok(())
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        let data_file = self.store_path();
        if !data_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&data_file).map_err(NotecraftError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(NotecraftError::Serialization)?;
        Ok(entries)
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(entries).map_err(NotecraftError::Serialization)?;
        fs::write(self.store_path(), content).map_err(NotecraftError::Io)?;
        Ok(())
    }
}

impl SequenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load_entries()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_entries()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save_entries(&entries)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load_entries()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert_eq!(store.get("seq_GEN_2026_01").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn values_survive_a_new_instance() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.set("seq_EQ_2026_03", "4").unwrap();

        let reopened = FileStore::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get("seq_EQ_2026_03").unwrap(),
            Some("4".to_string())
        );
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.remove("docid_session").unwrap();
        assert!(!store.store_path().exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILENAME), "{not json").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.get("anything"),
            Err(NotecraftError::Serialization(_))
        ));
    }
}
