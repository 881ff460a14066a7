//! Entry form input: raw field strings in, a validated entry out.
//!
//! Numbers are coerced the way a browser coerces a text field: surrounding
//! whitespace is ignored, an empty field reads as zero, and anything that
//! does not parse becomes NaN. Validation then rejects what isn't finite
//! and positive.

use crate::model::{Coordinates, UnknownWorkoutType, Workout, WorkoutType};

/// The entry form's fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Errors that reject a form submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Inputs have to be a positive number!")]
    InvalidInput,

    #[error(transparent)]
    UnknownType(#[from] UnknownWorkoutType),
}

/// A submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryInput {
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence: f64,
    },
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

impl FormFields {
    /// Parses and validates the fields.
    ///
    /// Distance, duration and cadence must be finite and positive.
    /// Elevation gain only has to be finite: a ride can end lower than it began.
    pub fn parse(&self) -> Result<EntryInput, FormError> {
        let kind: WorkoutType = self.kind.parse()?;
        let distance_km = coerce(&self.distance);
        let duration_min = coerce(&self.duration);

        match kind {
            WorkoutType::Running => {
                let cadence = coerce(&self.cadence);
                if !all_finite(&[distance_km, duration_min, cadence])
                    || !all_positive(&[distance_km, duration_min, cadence])
                {
                    return Err(FormError::InvalidInput);
                }
                Ok(EntryInput::Running {
                    distance_km,
                    duration_min,
                    cadence,
                })
            }
            WorkoutType::Cycling => {
                let elevation_gain_m = coerce(&self.elevation);
                if !all_finite(&[distance_km, duration_min, elevation_gain_m])
                    || !all_positive(&[distance_km, duration_min])
                {
                    return Err(FormError::InvalidInput);
                }
                Ok(EntryInput::Cycling {
                    distance_km,
                    duration_min,
                    elevation_gain_m,
                })
            }
        }
    }

    /// Empties the numeric fields the form clears after a successful entry.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
    }
}

impl EntryInput {
    /// Builds the workout at the given location, stamped now.
    pub fn into_workout(self, coordinates: Coordinates) -> Workout {
        match self {
            Self::Running {
                distance_km,
                duration_min,
                cadence,
            } => Workout::running(coordinates, distance_km, duration_min, cadence),
            Self::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => Workout::cycling(coordinates, distance_km, duration_min, elevation_gain_m),
        }
    }
}

/// String to number, with browser text-field semantics.
fn coerce(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(kind: &str, distance: &str, duration: &str, extra: &str) -> FormFields {
        FormFields {
            kind: kind.into(),
            distance: distance.into(),
            duration: duration.into(),
            cadence: extra.into(),
            elevation: extra.into(),
        }
    }

    #[test]
    fn parses_running_entry() {
        let input = fields("running", "5.2", " 24 ", "178").parse().unwrap();
        assert_eq!(
            input,
            EntryInput::Running {
                distance_km: 5.2,
                duration_min: 24.0,
                cadence: 178.0,
            }
        );
    }

    #[test]
    fn parses_cycling_entry_with_negative_elevation() {
        let input = fields("cycling", "27", "85", "-120").parse().unwrap();
        assert_eq!(
            input,
            EntryInput::Cycling {
                distance_km: 27.0,
                duration_min: 85.0,
                elevation_gain_m: -120.0,
            }
        );
    }

    #[test]
    fn rejects_non_positive_distance_for_both_types() {
        for kind in ["running", "cycling"] {
            let err = fields(kind, "-1", "20", "100").parse().unwrap_err();
            assert_eq!(err, FormError::InvalidInput);
        }
    }

    #[test]
    fn rejects_non_finite_and_unparsable_values() {
        for bad in ["abc", "inf", "NaN", "1e999"] {
            let err = fields("running", bad, "20", "170").parse().unwrap_err();
            assert_eq!(err, FormError::InvalidInput, "input {bad:?}");
        }
        let err = fields("cycling", "10", "20", "lots").parse().unwrap_err();
        assert_eq!(err, FormError::InvalidInput);
    }

    #[test]
    fn empty_field_reads_as_zero_and_fails() {
        let err = fields("running", "5", "", "170").parse().unwrap_err();
        assert_eq!(err, FormError::InvalidInput);
    }

    #[test]
    fn running_requires_positive_cadence() {
        let err = fields("running", "5", "25", "0").parse().unwrap_err();
        assert_eq!(err, FormError::InvalidInput);
    }

    #[test]
    fn cycling_accepts_zero_elevation() {
        assert!(fields("cycling", "5", "25", "").parse().is_ok());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = fields("swimming", "5", "25", "170").parse().unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownType(UnknownWorkoutType("swimming".into()))
        );
    }

    #[test]
    fn invalid_input_message() {
        assert_eq!(
            FormError::InvalidInput.to_string(),
            "Inputs have to be a positive number!"
        );
    }

    #[test]
    fn clear_keeps_type_and_elevation() {
        let mut f = fields("cycling", "5", "25", "300");
        f.clear();
        assert_eq!(f.kind, "cycling");
        assert_eq!(f.elevation, "300");
        assert!(f.distance.is_empty() && f.duration.is_empty() && f.cadence.is_empty());
    }
}
