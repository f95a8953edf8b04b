//! In-memory adapters for unit tests.

use crate::domain::ports::{Reporter, RunEvent, Storage};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, data: impl AsRef<[u8]>) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.into(), data.as_ref().to_vec());
    }

    pub fn get_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files.get(path.as_ref()).cloned()
    }

    pub fn get_json(&self, path: impl AsRef<Path>) -> serde_json::Value {
        let data = self.get_file(path).expect("file should exist");
        serde_json::from_slice(&data).expect("file should hold valid JSON")
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.get_file(path).ok_or_else(|| EtlError::FileNotFound {
            path: path.to_path_buf(),
        })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.insert(path, data);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}
