use crate::domain::model::Profile;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::path::Path;

/// Reading and writing of the JSON documents the tool edits.
pub struct JsonDataManager;

impl JsonDataManager {
    pub async fn load_json<S: Storage>(storage: &S, path: &Path) -> Result<Value> {
        let bytes = storage.read_file(path).await?;
        serde_json::from_slice(&bytes).map_err(|e| EtlError::json(path, e))
    }

    /// Two-space indent, non-ASCII written literally, no trailing newline.
    pub fn to_json_bytes(data: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(data)?)
    }

    pub async fn save_json<S: Storage>(storage: &S, path: &Path, data: &Value) -> Result<()> {
        let bytes = Self::to_json_bytes(data)?;
        storage.write_file(path, &bytes).await
    }
}

/// A `{ "profiles": [...], ... }` document. Keys other than `profiles` are
/// carried through untouched and in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDataset {
    document: Value,
}

impl LanguageDataset {
    pub fn from_value(path: &Path, document: Value) -> Result<Self> {
        match document.as_object() {
            None => Err(EtlError::invalid_dataset(path, "root is not a JSON object")),
            Some(root) => match root.get("profiles") {
                None => Err(EtlError::invalid_dataset(path, "missing \"profiles\" key")),
                Some(Value::Array(_)) => Ok(Self { document }),
                Some(_) => Err(EtlError::invalid_dataset(path, "\"profiles\" is not an array")),
            },
        }
    }

    pub async fn load<S: Storage>(storage: &S, path: &Path) -> Result<Self> {
        let document = JsonDataManager::load_json(storage, path).await?;
        Self::from_value(path, document)
    }

    fn profiles(&self) -> &Vec<Value> {
        match self.document.get("profiles") {
            Some(Value::Array(profiles)) => profiles,
            _ => unreachable!("shape checked in from_value"),
        }
    }

    fn profiles_mut(&mut self) -> &mut Vec<Value> {
        match self.document.get_mut("profiles") {
            Some(Value::Array(profiles)) => profiles,
            _ => unreachable!("shape checked in from_value"),
        }
    }

    pub fn profile_count(&self) -> usize {
        self.profiles().len()
    }

    /// Ids of existing profiles; entries without a string `id` are skipped.
    pub fn profile_ids(&self) -> impl Iterator<Item = &str> {
        self.profiles()
            .iter()
            .filter_map(|p| p.get("id").and_then(Value::as_str))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.profile_ids().any(|existing| existing == id)
    }

    /// Appends in order. No dedup.
    pub fn append(&mut self, profiles: &[Profile]) -> Result<()> {
        let values = profiles
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.profiles_mut().extend(values);
        Ok(())
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        JsonDataManager::to_json_bytes(&self.document)
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }
}
