use chrono::{DateTime, Utc};

use crate::{
    coords::Coords,
    error::ValidationError,
    workout::{Workout, WorkoutType},
};

/// Which input of the workout form a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

/// Raw values of the workout form, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub workout_type: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            workout_type: WorkoutType::default().as_str().to_owned(),
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation_gain: String::new(),
        }
    }
}

impl WorkoutForm {
    /// Unknown types fall back to running, as the type select only offers the two.
    pub fn selected_type(&self) -> WorkoutType {
        self.workout_type.parse().unwrap_or_default()
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Distance => self.distance = value,
            FormField::Duration => self.duration = value,
            FormField::Cadence => self.cadence = value,
            FormField::ElevationGain => self.elevation_gain = value,
        }
    }

    /// Empties the numeric inputs. The selected type is kept.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation_gain.clear();
    }

    pub fn parse(&self, coords: Coords, date: DateTime<Utc>) -> Result<Workout, ValidationError> {
        let workout_type: WorkoutType = self.workout_type.parse()?;
        let distance = parse_number("distance", &self.distance)?;
        let duration = parse_number("duration", &self.duration)?;

        match workout_type {
            WorkoutType::Running => {
                let cadence = parse_number("cadence", &self.cadence)?;
                Workout::running(coords, distance, duration, cadence, date)
            }
            WorkoutType::Cycling => {
                let elevation_gain = parse_number("elevation gain", &self.elevation_gain)?;
                Workout::cycling(coords, distance, duration, elevation_gain, date)
            }
        }
    }
}

/// A blank input reads as zero, like an empty number field.
fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.);
    }

    let value: f64 = raw.parse().map_err(|_| ValidationError::NotFinite(field))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite(field))
    }
}
