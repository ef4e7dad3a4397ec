use web_sys::Storage;
use workout_tracker_lib::{KeyValueStore, StorageError};

/// `window.localStorage`. Missing storage (e.g. disabled by the browser) makes every call fail.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = gloo_utils::window().local_storage().ok().flatten();
        if storage.is_none() {
            gloo_console::error!("localStorage is not available, workouts will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(crate::util::js_error_message(&err)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|_| StorageError::Unavailable)
    }
}
