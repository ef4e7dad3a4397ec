use crate::coords::Coords;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Inputs have to be positive numbers!")]
    NotPositive(&'static str),
    #[error("Inputs have to be numbers! ({0} is not)")]
    NotFinite(&'static str),
    #[error("Unknown workout type: {0}")]
    UnknownType(String),
    #[error("Invalid coordinates: {0:?}")]
    InvalidCoords(Coords),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,
    #[error("Failed to write to storage: {0}")]
    Write(String),
    #[error("Failed to serialize workouts: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not get your position: {0}")]
    GeolocationDenied(String),
    #[error("The map is not ready yet")]
    MapUnavailable,
    #[error("Click on the map to choose where the workout took place")]
    NoPendingLocation,
    #[error("No workout with id {0}")]
    UnknownWorkout(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
