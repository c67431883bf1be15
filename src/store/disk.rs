use crate::store::{KeyValueStore, StoreError};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "state";

/// A fjall-backed store. Every write is synced before returning.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;

        let keyspace = Config::new(path.join("fxcalc_db")).open()?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        debug!("Opened state store at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.partition.get(key)? {
            Some(bytes) => {
                debug!("Store HIT for key: {}", key);
                Ok(Some(String::from_utf8(bytes.to_vec())?))
            }
            None => {
                debug!("Store MISS for key: {}", key);
                Ok(None)
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store PUT for key: {}", key);
        Ok(())
    }
}
