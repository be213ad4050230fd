use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tokenward_core::ports::CredentialStore;
use tokenward_core::Error;
use tracing::{debug, instrument};

const CREDENTIALS_FILE: &str = "credentials.json";

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex
        .lock()
        .map_err(|_| Error::CredentialStorage("credential store lock poisoned".to_string()))
}

// ============================================================================
// File store
// ============================================================================

/// JSON-file credential store. Every mutation rewrites the file, so values
/// survive restarts as soon as the call returns.
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    guard: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(CREDENTIALS_FILE),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, Error> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::CredentialStorage(format!("failed to parse credentials file: {}", e))
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(values).map_err(|e| {
            Error::CredentialStorage(format!("failed to serialize credentials: {}", e))
        })?;

        // Write next to the target and rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let _guard = lock(&self.guard)?;
        Ok(self.load()?.remove(key))
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let _guard = lock(&self.guard)?;
        let mut values = self.load()?;

        debug!(path = %self.path.display(), "storing credential");
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), Error> {
        let _guard = lock(&self.guard)?;
        let mut values = self.load()?;

        if values.remove(key).is_some() {
            debug!(path = %self.path.display(), "removing credential");
            self.save(&values)?;
        }
        Ok(())
    }
}

// ============================================================================
// Memory store
// ============================================================================

/// Process-local store. Nothing survives a restart; meant for tests and
/// previews.
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        lock(&self.values)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        lock(&self.values)?.remove(key);
        Ok(())
    }
}
