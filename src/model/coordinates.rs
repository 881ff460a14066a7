//! Coordinates: a point on the map.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Serialized as a two-element array, `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

/// Text that isn't a `LAT,LNG` pair of finite numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected LAT,LNG, got {0:?}")]
pub struct ParseCoordinatesError(String);

impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    /// Parses `"51.5,-0.12"`. Whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordinatesError(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        let lat: f64 = lat.trim().parse().map_err(|_| err())?;
        let lng: f64 = lng.trim().parse().map_err(|_| err())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(err());
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Coordinates::new(51.5, -0.12)).unwrap();
        assert_eq!(json, "[51.5,-0.12]");
    }

    #[test]
    fn deserializes_from_pair() {
        let c: Coordinates = serde_json::from_str("[39.0, -12.25]").unwrap();
        assert_eq!(c, Coordinates::new(39.0, -12.25));
    }

    #[test]
    fn parses_comma_separated_pair() {
        assert_eq!(
            "51.5, -0.12".parse::<Coordinates>(),
            Ok(Coordinates::new(51.5, -0.12))
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        for bad in ["51.5", "a,b", "1,2,3", "inf,0", ""] {
            assert!(bad.parse::<Coordinates>().is_err(), "input {bad:?}");
        }
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(serde_json::from_str::<Coordinates>("[1.0]").is_err());
    }
}
