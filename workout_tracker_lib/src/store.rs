use std::collections::HashMap;

use crate::{error::StorageError, workout::Workout};

/// Durable string key-value storage, e.g. the browser's localStorage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn serialize(workouts: &[Workout]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(workouts)?)
}

pub fn deserialize(blob: &str) -> Result<Vec<Workout>, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Reads the persisted workouts. Missing, unreadable or malformed data yields an empty list.
pub fn load(storage: &impl KeyValueStore, key: &str) -> Vec<Workout> {
    let blob = match storage.read(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::debug!("No stored workouts under {key:?}");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!("Could not read stored workouts: {err}");
            return Vec::new();
        }
    };

    let workouts = match deserialize(&blob) {
        Ok(workouts) => workouts,
        Err(err) => {
            tracing::warn!("Discarding malformed workout data: {err}");
            return Vec::new();
        }
    };

    // One broken record makes the whole blob suspect.
    if let Some((workout, err)) = workouts.iter().find_map(|w| w.validate().err().map(|err| (w, err))) {
        tracing::warn!("Discarding stored workouts, record {} is invalid: {err}", workout.id);
        return Vec::new();
    }

    tracing::info!("Restored {} workouts", workouts.len());
    workouts
}

pub fn save(storage: &mut impl KeyValueStore, key: &str, workouts: &[Workout]) -> Result<(), StorageError> {
    let blob = serialize(workouts)?;
    storage.write(key, &blob)
}
