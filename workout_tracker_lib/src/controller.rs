use chrono::{DateTime, Utc};

use crate::{
    config::TrackerConfig,
    coords::Coords,
    error::{TrackerError, ValidationError},
    form::{FormField, WorkoutForm},
    map::{MapService, MarkerPopup},
    store::{self, KeyValueStore},
    workout::Workout,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    /// Waiting for the geolocation service. The map has no view yet.
    AwaitingPosition,
    MapReady,
    /// The form is shown for a workout at `pending`.
    FormVisible { pending: Coords },
    FormHidden,
}

/// Keeps the workout list, the map markers and the persisted blob in sync.
pub struct Controller<M, S> {
    map: M,
    storage: S,
    config: TrackerConfig,
    state: ControllerState,
    workouts: Vec<Workout>,
    form: WorkoutForm,
    clock: fn() -> DateTime<Utc>,
}

impl<M: MapService, S: KeyValueStore> Controller<M, S> {
    /// Restores persisted workouts. They are listed but get no map markers.
    pub fn new(map: M, storage: S, config: TrackerConfig) -> Self {
        let workouts = store::load(&storage, &config.storage_key);

        Self {
            map,
            storage,
            config,
            state: ControllerState::AwaitingPosition,
            workouts,
            form: WorkoutForm::default(),
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn on_position(&mut self, position: Coords) {
        if self.state != ControllerState::AwaitingPosition {
            tracing::debug!("Ignoring position update {position:?}, map already initialized");
            return;
        }

        tracing::info!("Got position {position:?}");
        self.map.set_view(position, self.config.map_zoom);
        self.map.add_marker(position, &MarkerPopup::my_location());
        self.state = ControllerState::MapReady;
    }

    /// The state is left untouched and nothing is retried.
    pub fn on_position_error(&self, reason: impl Into<String>) -> TrackerError {
        let reason = reason.into();
        tracing::warn!("Geolocation failed: {reason}");
        TrackerError::GeolocationDenied(reason)
    }

    pub fn on_map_click(&mut self, at: Coords) -> Result<(), TrackerError> {
        if self.state == ControllerState::AwaitingPosition {
            return Err(TrackerError::MapUnavailable);
        }
        if !at.is_valid() {
            return Err(ValidationError::InvalidCoords(at).into());
        }

        self.state = ControllerState::FormVisible { pending: at };
        Ok(())
    }

    pub fn select_type(&mut self, workout_type: &str) {
        self.form.workout_type = workout_type.to_owned();
    }

    pub fn update_field(&mut self, field: FormField, value: String) {
        self.form.set(field, value);
    }

    /// Turns the form into a workout, places its marker and persists the list.
    ///
    /// On a validation error nothing changes and the form stays open. A storage
    /// error is reported after the workout was already added in memory.
    pub fn submit(&mut self) -> Result<&Workout, TrackerError> {
        let pending = match self.state {
            ControllerState::FormVisible { pending } => pending,
            ControllerState::AwaitingPosition => return Err(TrackerError::MapUnavailable),
            ControllerState::MapReady | ControllerState::FormHidden => return Err(TrackerError::NoPendingLocation),
        };

        let workout = self.form.parse(pending, (self.clock)())?;
        tracing::info!("New workout {}: {}", workout.id, workout.description);

        self.map.add_marker(workout.coords, &MarkerPopup::for_workout(&workout));
        let index = self.workouts.len();
        self.workouts.push(workout);
        self.form.clear();
        self.state = ControllerState::FormHidden;

        store::save(&mut self.storage, &self.config.storage_key, &self.workouts)?;

        Ok(&self.workouts[index])
    }

    /// Moves the map to a listed workout.
    pub fn focus_workout(&mut self, id: &str) -> Result<(), TrackerError> {
        if self.state == ControllerState::AwaitingPosition {
            return Err(TrackerError::MapUnavailable);
        }

        let workout = self
            .workouts
            .iter()
            .find(|workout| workout.id == id)
            .ok_or_else(|| TrackerError::UnknownWorkout(id.to_owned()))?;

        self.map.pan_to(workout.coords, self.config.map_zoom, self.config.pan_duration_secs);
        Ok(())
    }

    /// Drops all persisted workouts. The host is expected to restart afterwards.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        self.storage.remove(&self.config.storage_key)?;
        self.workouts.clear();
        tracing::info!("Cleared all workouts");
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn pending_coords(&self) -> Option<Coords> {
        match self.state {
            ControllerState::FormVisible { pending } => Some(pending),
            _ => None,
        }
    }

    pub fn is_form_visible(&self) -> bool {
        matches!(self.state, ControllerState::FormVisible { .. })
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        error::StorageError,
        store::MemoryStore,
        workout::WorkoutKind,
    };

    #[derive(Default)]
    struct RecordingMap {
        views: Vec<(Coords, f64)>,
        markers: Vec<(Coords, MarkerPopup)>,
        pans: Vec<Coords>,
    }

    impl MapService for RecordingMap {
        fn set_view(&mut self, center: Coords, zoom: f64) {
            self.views.push((center, zoom));
        }

        fn add_marker(&mut self, at: Coords, popup: &MarkerPopup) {
            self.markers.push((at, popup.clone()));
        }

        fn pan_to(&mut self, center: Coords, _zoom: f64, _duration_secs: f64) {
            self.pans.push(center);
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
    }

    fn ready_controller() -> Controller<RecordingMap, MemoryStore> {
        let mut controller = Controller::new(RecordingMap::default(), MemoryStore::new(), TrackerConfig::default())
            .with_clock(fixed_now);
        controller.on_position(Coords(56.17, 10.19));
        controller
    }

    fn fill(controller: &mut Controller<RecordingMap, MemoryStore>, workout_type: &str, distance: &str, duration: &str, third: &str) {
        controller.select_type(workout_type);
        controller.update_field(FormField::Distance, distance.into());
        controller.update_field(FormField::Duration, duration.into());
        let field = if workout_type == "running" { FormField::Cadence } else { FormField::ElevationGain };
        controller.update_field(field, third.into());
    }

    #[test]
    fn position_initializes_map() {
        let controller = ready_controller();
        assert_eq!(controller.state(), ControllerState::MapReady);
        assert_eq!(controller.map().views, vec![(Coords(56.17, 10.19), 13.)]);
        assert_eq!(controller.map().markers.len(), 1);
        assert_eq!(controller.map().markers[0].1, MarkerPopup::my_location());
    }

    #[test]
    fn position_error_keeps_waiting() {
        let mut controller = Controller::new(RecordingMap::default(), MemoryStore::new(), TrackerConfig::default());
        let err = controller.on_position_error("User denied Geolocation");
        assert!(matches!(err, TrackerError::GeolocationDenied(_)));
        assert_eq!(controller.state(), ControllerState::AwaitingPosition);
        assert!(controller.map().views.is_empty());

        assert!(matches!(controller.on_map_click(Coords(1., 1.)), Err(TrackerError::MapUnavailable)));
        assert!(matches!(controller.submit(), Err(TrackerError::MapUnavailable)));
    }

    #[test]
    fn map_click_shows_form() {
        let mut controller = ready_controller();
        controller.on_map_click(Coords(10., 10.)).unwrap();
        assert_eq!(controller.state(), ControllerState::FormVisible { pending: Coords(10., 10.) });

        controller.on_map_click(Coords(11., 11.)).unwrap();
        assert_eq!(controller.pending_coords(), Some(Coords(11., 11.)));
    }

    #[test]
    fn out_of_range_click_keeps_form_closed() {
        let mut controller = ready_controller();
        let err = controller.on_map_click(Coords(10., 190.)).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(ValidationError::InvalidCoords(_))));
        assert_eq!(controller.state(), ControllerState::MapReady);

        controller.on_map_click(Coords(10., 10.)).unwrap();
        controller.on_map_click(Coords(91., 10.)).unwrap_err();
        assert_eq!(controller.pending_coords(), Some(Coords(10., 10.)));
    }

    #[test]
    fn cycling_end_to_end() {
        let mut controller = Controller::new(RecordingMap::default(), MemoryStore::new(), TrackerConfig::default());
        controller.on_position(Coords(56.17, 10.19));
        controller.on_map_click(Coords(10., 10.)).unwrap();
        fill(&mut controller, "cycling", "20", "60", "400");

        let before = Utc::now();
        let workout = controller.submit().unwrap().clone();

        assert_eq!(workout.kind, WorkoutKind::Cycling { elevation_gain: 400., speed: 20. });
        assert_eq!(workout.coords, Coords(10., 10.));
        assert!(workout.date >= before && workout.date <= Utc::now());
        let local = workout.date.with_timezone(&chrono::Local);
        assert!(workout.description.contains(&local.format("%B").to_string()));
        assert!(workout.description.ends_with(&format!(" {}", local.format("%-d"))));

        assert_eq!(controller.workouts(), &[workout.clone()]);
        assert_eq!(controller.state(), ControllerState::FormHidden);
        assert_eq!(controller.form(), &WorkoutForm { workout_type: "cycling".into(), ..WorkoutForm::default() });

        let (at, popup) = controller.map().markers.last().unwrap();
        assert_eq!(*at, Coords(10., 10.));
        assert_eq!(popup.class_name, "cycling-popup");
        assert!(!popup.auto_close && !popup.close_on_click);

        let persisted = store::deserialize(controller.storage().get("workouts").unwrap()).unwrap();
        assert_eq!(persisted, vec![workout]);
    }

    #[test]
    fn invalid_submission_changes_nothing() {
        let mut controller = ready_controller();
        controller.on_map_click(Coords(10., 10.)).unwrap();
        fill(&mut controller, "running", "0", "20", "180");

        let err = controller.submit().unwrap_err();
        assert!(matches!(err, TrackerError::Validation(ValidationError::NotPositive("distance"))));
        assert_eq!(err.to_string(), "Inputs have to be positive numbers!");

        assert!(controller.workouts().is_empty());
        assert_eq!(controller.map().markers.len(), 1);
        assert!(controller.storage().get("workouts").is_none());
        assert!(controller.is_form_visible());
        assert_eq!(controller.form().distance, "0");
    }

    #[test]
    fn submit_without_click() {
        let mut controller = ready_controller();
        fill(&mut controller, "running", "5", "20", "180");
        assert!(matches!(controller.submit(), Err(TrackerError::NoPendingLocation)));
    }

    #[test]
    fn form_can_be_reopened_after_submit() {
        let mut controller = ready_controller();
        controller.on_map_click(Coords(10., 10.)).unwrap();
        fill(&mut controller, "running", "5", "25", "170");
        controller.submit().unwrap();

        controller.on_map_click(Coords(12., 12.)).unwrap();
        assert!(controller.is_form_visible());
    }

    #[test]
    fn restored_workouts_have_no_markers() {
        let mut storage = MemoryStore::new();
        let saved = Workout::running(Coords(10., 10.), 5., 25., 170., fixed_now()).unwrap();
        store::save(&mut storage, "workouts", &[saved.clone()]).unwrap();

        let mut controller = Controller::new(RecordingMap::default(), storage, TrackerConfig::default());
        assert_eq!(controller.workouts(), &[saved]);

        controller.on_position(Coords(56.17, 10.19));
        assert_eq!(controller.map().markers.len(), 1);
    }

    #[test]
    fn malformed_storage_starts_empty() {
        let mut storage = MemoryStore::new();
        storage.write("workouts", "[{\"id\":").unwrap();
        let controller = Controller::new(RecordingMap::default(), storage, TrackerConfig::default());
        assert!(controller.workouts().is_empty());
    }

    #[test]
    fn focus_pans_without_mutation() {
        let mut controller = ready_controller();
        controller.on_map_click(Coords(10., 10.)).unwrap();
        fill(&mut controller, "running", "5", "25", "170");
        let id = controller.submit().unwrap().id.clone();

        controller.focus_workout(&id).unwrap();
        assert_eq!(controller.map().pans, vec![Coords(10., 10.)]);
        assert_eq!(controller.workouts()[0].clicks, 0);

        assert!(matches!(controller.focus_workout("nope"), Err(TrackerError::UnknownWorkout(_))));
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut controller = Controller::new(RecordingMap::default(), ReadOnlyStore, TrackerConfig::default())
            .with_clock(fixed_now);
        controller.on_position(Coords(56.17, 10.19));
        controller.on_map_click(Coords(10., 10.)).unwrap();
        controller.select_type("running");
        controller.update_field(FormField::Distance, "5".into());
        controller.update_field(FormField::Duration, "25".into());
        controller.update_field(FormField::Cadence, "170".into());

        assert!(matches!(controller.submit(), Err(TrackerError::Storage(StorageError::Write(_)))));
        assert_eq!(controller.workouts().len(), 1);
    }

    #[test]
    fn reset_clears_storage() {
        let config = TrackerConfig::default().with_storage_key("test-workouts");
        let mut controller = Controller::new(RecordingMap::default(), MemoryStore::new(), config).with_clock(fixed_now);
        controller.on_position(Coords(56.17, 10.19));
        controller.on_map_click(Coords(10., 10.)).unwrap();
        fill(&mut controller, "cycling", "20", "60", "400");
        controller.submit().unwrap();
        assert!(controller.storage().get("test-workouts").is_some());

        controller.reset().unwrap();
        assert!(controller.storage().get("test-workouts").is_none());
        assert!(controller.workouts().is_empty());
    }
}
