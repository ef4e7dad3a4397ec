pub mod config;
pub mod controller;
pub mod coords;
pub mod error;
pub mod form;
pub mod map;
pub mod store;
pub mod workout;

pub use config::TrackerConfig;
pub use controller::{Controller, ControllerState};
pub use coords::Coords;
pub use error::{StorageError, TrackerError, ValidationError};
pub use form::{FormField, WorkoutForm};
pub use map::{MapService, MarkerPopup};
pub use store::{KeyValueStore, MemoryStore};
pub use workout::{Workout, WorkoutKind, WorkoutType};
