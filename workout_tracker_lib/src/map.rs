use crate::{coords::Coords, workout::Workout};

pub const POPUP_MAX_WIDTH: f64 = 250.;
pub const POPUP_MIN_WIDTH: f64 = 100.;

/// Popup attached to a marker when it is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub content: String,
    pub class_name: String,
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub open: bool,
}

impl MarkerPopup {
    pub fn my_location() -> Self {
        Self {
            content: "My location".to_owned(),
            class_name: String::new(),
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: true,
            close_on_click: true,
            open: true,
        }
    }

    pub fn for_workout(workout: &Workout) -> Self {
        let workout_type = workout.workout_type();
        Self {
            content: format!("{} {}", workout_type.emoji(), workout.description),
            class_name: format!("{}-popup", workout_type),
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
            open: true,
        }
    }
}

/// The interactive map the tracker draws on.
pub trait MapService {
    fn set_view(&mut self, center: Coords, zoom: f64);

    fn add_marker(&mut self, at: Coords, popup: &MarkerPopup);

    /// Animated move to `center`.
    fn pan_to(&mut self, center: Coords, zoom: f64, duration_secs: f64);
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn workout_popup() {
        let date = Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap();
        let run = Workout::running(Coords(10., 10.), 5., 25., 170., date).unwrap();
        let popup = MarkerPopup::for_workout(&run);

        assert_eq!(popup.content, format!("🏃‍♂️ {}", run.description));
        assert!(run.description.starts_with("Running on April "));
        assert_eq!(popup.class_name, "running-popup");
        assert_eq!((popup.max_width, popup.min_width), (250., 100.));
        assert!(popup.open && !popup.auto_close && !popup.close_on_click);
    }
}
