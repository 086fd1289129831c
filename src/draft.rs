use std::collections::HashMap;
use std::io;

use pakform_types::DocumentError;

/// Fixed identifier under which the single working draft is stored.
pub const DRAFT_KEY: &str = "pakform-draft";

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("could not read draft")]
    Read(#[source] io::Error),

    #[error("could not write draft")]
    Write(#[source] io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Where draft snapshots live. The editor core only ever speaks JSON text
/// through this trait; the storage medium is the collaborator's business.
pub trait DraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, DraftError>;
    fn write(&mut self, key: &str, snapshot: &str) -> Result<(), DraftError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: HashMap<String, String>,
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, snapshot: &str) -> Result<(), DraftError> {
        self.entries.insert(key.into(), snapshot.into());
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use self::fs_store::FsDraftStore;

#[cfg(feature = "cli")]
mod fs_store {
    use std::fs;
    use std::path::PathBuf;

    use directories::BaseDirs;

    use super::{DraftError, DraftStore};

    /// Draft snapshots as files under a config directory, one file per key.
    #[derive(Debug, Clone)]
    pub struct FsDraftStore {
        dir: PathBuf,
    }

    impl FsDraftStore {
        pub fn new(dir: PathBuf) -> FsDraftStore {
            FsDraftStore { dir }
        }

        pub fn default_dir() -> Option<PathBuf> {
            BaseDirs::new().map(|x| x.config_dir().join("Pakform"))
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{}.json", key))
        }
    }

    impl DraftStore for FsDraftStore {
        fn read(&self, key: &str) -> Result<Option<String>, DraftError> {
            let path = self.path_for(key);
            if !path.exists() {
                return Ok(None);
            }
            fs::read_to_string(&path).map(Some).map_err(DraftError::Read)
        }

        fn write(&mut self, key: &str, snapshot: &str) -> Result<(), DraftError> {
            fs::create_dir_all(&self.dir).map_err(DraftError::Write)?;
            fs::write(self.path_for(key), snapshot).map_err(DraftError::Write)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_by_key() {
        let mut store = MemoryDraftStore::default();
        assert_eq!(store.read(DRAFT_KEY).unwrap(), None);

        store.write(DRAFT_KEY, "{}").unwrap();
        assert_eq!(store.read(DRAFT_KEY).unwrap().as_deref(), Some("{}"));
        assert_eq!(store.read("other").unwrap(), None);
    }
}
