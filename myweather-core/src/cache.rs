//! Durable storage for the last successful weather payload.
//!
//! The app keeps exactly one entry, under [`WEATHER_RESPONSE_DATA`], in a
//! small string-to-string preference store. There is no in-memory layer:
//! every [`WeatherCache::load`] goes to the store.

use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use thiserror::Error;
use tracing::debug;

use crate::{error::WeatherError, model::WeatherPayload};

/// Name of the preference store file (without extension).
pub const PREFERENCE_NAME: &str = "weatherAppPreference";
/// Key holding the serialized payload.
pub const WEATHER_RESPONSE_DATA: &str = "weatherResponseData";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("preference file {path} is not a valid string map: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference store lock poisoned")]
    Poisoned,
}

pub trait KeyValueStore: Send + Sync + Debug {
    fn get_string(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn put_string(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// A JSON object of strings on disk, rewritten in full on every put.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store named [`PREFERENCE_NAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{PREFERENCE_NAME}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, CacheError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| CacheError::Format {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read_all()?.remove(key))
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;

        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let json = serde_json::to_string_pretty(&entries).map_err(|source| CacheError::Format {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        debug!(key, path = %self.path.display(), "preference written");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct WeatherCache {
    store: Box<dyn KeyValueStore>,
}

impl WeatherCache {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Overwrites the cached entry with `payload`.
    pub fn save(&self, payload: &WeatherPayload) -> Result<(), WeatherError> {
        let json = serde_json::to_string(payload)?;
        self.store.put_string(WEATHER_RESPONSE_DATA, &json)?;
        Ok(())
    }

    /// The serialized payload, if one was ever saved.
    pub fn load(&self) -> Result<Option<String>, WeatherError> {
        Ok(self.store.get_string(WEATHER_RESPONSE_DATA)?)
    }
}
