//! LMDB implementation of KeyValueStore.

use heed::types::Str;
use heed::{Database, Env};

use ballot_store::{KeyValueStore, StoreError};

use crate::LmdbError;

/// String key-value pairs stored in the environment's `local_storage` database.
#[derive(Clone)]
pub struct LmdbKvStore {
    pub(crate) env: Env,
    pub(crate) db: Database<Str, Str>,
}

impl KeyValueStore for LmdbKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .db
            .get(&rtxn, key)
            .map_err(|e| match e {
                heed::Error::Decoding(_) => StoreError::Encoding {
                    key: key.to_string(),
                },
                other => LmdbError::from(other).into(),
            })?
            .map(str::to_owned);
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.db
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
