use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{coords::Coords, error::ValidationError};

/// Number of trailing digits of the creation time (epoch millis) kept as id.
const ID_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(ValidationError::UnknownType(other.to_owned())),
        }
    }
}

/// The per-variant part of a workout, including its derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

/// One logged activity. Everything but `clicks` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// min
    pub duration: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl Workout {
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64, date: DateTime<Utc>) -> Result<Self, ValidationError> {
        check_common(coords, distance, duration)?;
        check_positive("cadence", cadence)?;

        let kind = WorkoutKind::Running {
            cadence,
            pace: duration / distance,
        };
        Ok(Self::new(coords, distance, duration, date, kind))
    }

    /// Elevation gain may be zero or negative, only finiteness is checked.
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64, date: DateTime<Utc>) -> Result<Self, ValidationError> {
        check_common(coords, distance, duration)?;
        check_finite("elevation gain", elevation_gain)?;

        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.),
        };
        Ok(Self::new(coords, distance, duration, date, kind))
    }

    fn new(coords: Coords, distance: f64, duration: f64, date: DateTime<Utc>, kind: WorkoutKind) -> Self {
        let workout_type = match kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        };

        Self {
            id: id_from_date(&date),
            description: describe(workout_type, &date.with_timezone(&Local)),
            date,
            coords,
            distance,
            duration,
            clicks: 0,
            kind,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self.kind {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Pace in min/km for runs, speed in km/h for rides.
    pub fn metric(&self) -> f64 {
        match self.kind {
            WorkoutKind::Running { pace, .. } => pace,
            WorkoutKind::Cycling { speed, .. } => speed,
        }
    }

    /// Checks the invariants a constructed workout upholds, e.g. after reading it back from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_common(self.coords, self.distance, self.duration)?;
        match self.kind {
            WorkoutKind::Running { cadence, pace } => {
                check_positive("cadence", cadence)?;
                check_positive("pace", pace)
            }
            WorkoutKind::Cycling { elevation_gain, speed } => {
                check_finite("elevation gain", elevation_gain)?;
                check_positive("speed", speed)
            }
        }
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }
}

/// `"<Type> on <Month> <day>"`, with month and day taken in the zone of `date`.
fn describe<Tz: TimeZone>(workout_type: WorkoutType, date: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{} on {}", workout_type.label(), date.format("%B %-d"))
}

fn id_from_date(date: &DateTime<Utc>) -> String {
    let millis = date.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(ID_DIGITS);
    millis[start..].to_owned()
}

fn check_common(coords: Coords, distance: f64, duration: f64) -> Result<(), ValidationError> {
    if !coords.is_valid() {
        return Err(ValidationError::InvalidCoords(coords));
    }
    check_positive("distance", distance)?;
    check_positive("duration", duration)
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite(field))
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value > 0. {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}
