//! Workout types: the unit of record in Mapty.
//!
//! Derived values (pace, speed, description) are computed once at
//! construction and stored alongside the inputs. Nothing recomputes them.

use std::{fmt, str::FromStr};

use jiff::{Timestamp, Zoned, civil::Date};
use serde::{Deserialize, Serialize};

use super::Coordinates;

/// English month names, indexed from zero.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of trailing millisecond digits kept for a workout id.
const ID_DIGITS: usize = 10;

/// One recorded exercise session.
///
/// Fields are read-only once constructed, except the interaction counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: String,
    created_at: Timestamp,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    interaction_count: u32,

    /// Variant payload. Flattened so the `type` tag sits beside the common fields.
    #[serde(flatten)]
    kind: WorkoutKind,
}

/// What a workout is, along with the one metric derived for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum WorkoutKind {
    Running {
        /// Steps per minute.
        cadence: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        /// Not required to be positive.
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutKind {
    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Running { .. } => WorkoutType::Running,
            Self::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

impl Workout {
    /// Creates a running workout stamped with the current local time.
    ///
    /// Inputs are assumed valid; see [`crate::form`] for validation.
    pub fn running(coordinates: Coordinates, distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        Self::running_at(&Zoned::now(), coordinates, distance_km, duration_min, cadence)
    }

    /// Creates a cycling workout stamped with the current local time.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::cycling_at(&Zoned::now(), coordinates, distance_km, duration_min, elevation_gain_m)
    }

    pub fn running_at(
        created_at: &Zoned,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
    ) -> Self {
        let kind = WorkoutKind::Running {
            cadence,
            pace_min_per_km: duration_min / distance_km,
        };
        Self::assemble(created_at, coordinates, distance_km, duration_min, kind)
    }

    pub fn cycling_at(
        created_at: &Zoned,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let kind = WorkoutKind::Cycling {
            elevation_gain_m,
            speed_km_per_h: distance_km / (duration_min / 60.0),
        };
        Self::assemble(created_at, coordinates, distance_km, duration_min, kind)
    }

    fn assemble(
        created_at: &Zoned,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        kind: WorkoutKind,
    ) -> Self {
        let timestamp = created_at.timestamp();
        Self {
            id: id_from(timestamp),
            created_at: timestamp,
            coordinates,
            distance_km,
            duration_min,
            description: describe(kind.workout_type(), created_at.date()),
            interaction_count: 0,
            kind,
        }
    }

    /// Bumps the interaction counter.
    ///
    /// The counter is carried and persisted, but no event increments it yet.
    #[allow(dead_code)]
    pub fn record_interaction(&mut self) {
        self.interaction_count += 1;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    #[allow(dead_code)]
    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }
}

/// The trailing ten digits of the creation time in Unix milliseconds.
///
/// Two workouts created in the same millisecond share an id.
fn id_from(timestamp: Timestamp) -> String {
    let millis = timestamp.as_millisecond().to_string();
    let start = millis.len().saturating_sub(ID_DIGITS);
    millis[start..].to_string()
}

/// Builds a description like `"Running on April 14"`.
fn describe(workout_type: WorkoutType, date: Date) -> String {
    let month = MONTHS[usize::from(date.month().unsigned_abs()) - 1];
    format!("{} on {month} {}", workout_type.label(), date.day())
}

/// The workout discriminant on its own, as chosen in the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutType {
    Running,
    Cycling,
}

/// A type tag that is neither `running` nor `cycling`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown workout type: {0:?}")]
pub struct UnknownWorkoutType(pub String);

impl WorkoutType {
    /// The lowercase tag used in forms and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    /// The capitalized name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }

    /// The other type; what the form switches to on a type change.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Cycling,
            Self::Cycling => Self::Running,
        }
    }
}

impl FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(UnknownWorkoutType(other.to_string())),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
