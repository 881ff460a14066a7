//! Where the user is: the one-shot position lookup that centers the map.

use crate::model::Coordinates;

/// The position could not be determined. No retry is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not get your position")]
pub struct GeolocationError;

/// A source for the current position.
pub trait Geolocator {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position known up front, from `--at` or the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl Geolocator for FixedPosition {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or(GeolocationError)
    }
}
