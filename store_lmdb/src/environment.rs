//! LMDB environment setup.

use std::path::{Path, PathBuf};

use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};

use crate::{LmdbError, LmdbKvStore};

/// Name of the database holding client-side key-value pairs.
const LOCAL_STORAGE_DB: &str = "local_storage";

/// Upper bound on named databases in the environment.
const MAX_DBS: u32 = 4;

/// Default map size: the store only ever holds a handful of short strings.
pub const DEFAULT_MAP_SIZE: usize = 16 * 1024 * 1024;

/// Wraps the LMDB environment and its database handles.
pub struct LmdbEnvironment {
    env: Env,
    local_storage: Database<Str, Str>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in `path`, creating the directory if needed.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for a given directory
        // and the memory map is never accessed outside heed's transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let local_storage = env.create_database(&mut wtxn, Some(LOCAL_STORAGE_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");

        Ok(Self {
            env,
            local_storage,
            path: path.to_path_buf(),
        })
    }

    /// Directory the environment lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key-value store over the `local_storage` database.
    pub fn kv_store(&self) -> LmdbKvStore {
        LmdbKvStore {
            env: self.env.clone(),
            db: self.local_storage,
        }
    }
}
