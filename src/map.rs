//! The map collaborator: centering the view and pinning workout markers.
//!
//! [`MapView`] is the seam. The session only ever talks to a map it has
//! been handed, so a marker can never be drawn before a map exists.

use std::io::Write;

use crate::model::{Coordinates, Workout};

/// Zoom level used when no configuration says otherwise.
pub const DEFAULT_ZOOM: u8 = 13;

/// Attribution shown for the tile layer.
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// What a map has to be able to do.
pub trait MapView {
    /// Centers the map. `pan` animates the move when given.
    fn set_view(&mut self, center: Coordinates, zoom: u8, pan: Option<PanOptions>);

    /// Pins a marker and opens its popup.
    fn add_marker(&mut self, marker: &Marker);

    /// Removes every pinned marker.
    fn clear_markers(&mut self);
}

/// How a re-centering move is animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

/// A popup bound to a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub max_width: u32,
    pub min_width: u32,
    /// Close when another popup opens.
    pub auto_close: bool,
    /// Close when the map is clicked.
    pub close_on_click: bool,
    /// Styling hook, e.g. `running-popup`.
    pub class_name: String,
    pub content: String,
}

/// A workout pinned to the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub at: Coordinates,
    pub popup: Popup,
}

impl Marker {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.workout_type();
        Self {
            at: workout.coordinates(),
            popup: Popup {
                max_width: 250,
                min_width: 100,
                auto_close: false,
                close_on_click: false,
                class_name: format!("{kind}-popup"),
                content: format!("{} {}", kind.emoji(), workout.description()),
            },
        }
    }
}

/// A map drawn as lines of text.
pub struct TerminalMap<W> {
    out: W,
    pinned: usize,
}

impl<W: Write> TerminalMap<W> {
    pub fn new(out: W) -> Self {
        Self { out, pinned: 0 }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to draw map output");
        }
    }
}

impl<W: Write> MapView for TerminalMap<W> {
    fn set_view(&mut self, center: Coordinates, zoom: u8, pan: Option<PanOptions>) {
        let text = match pan {
            Some(p) if p.animate => {
                format!("map: panning to {center} (zoom {zoom}, {}s)", p.duration_secs)
            }
            _ => format!("map: centered on {center} (zoom {zoom}) | {ATTRIBUTION}"),
        };
        self.line(&text);
    }

    fn add_marker(&mut self, marker: &Marker) {
        let text = format!(
            "map: 📍 {} [{}] {}",
            marker.at, marker.popup.class_name, marker.popup.content
        );
        self.line(&text);
        self.pinned += 1;
    }

    fn clear_markers(&mut self) {
        if self.pinned > 0 {
            self.pinned = 0;
            self.line("map: markers cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{civil::date, tz::TimeZone};

    fn ride() -> Workout {
        let created = date(2024, 4, 14)
            .at(8, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        Workout::cycling_at(&created, Coordinates::new(39.0, -12.0), 27.0, 85.0, 523.0)
    }

    #[test]
    fn marker_popup_matches_workout() {
        let marker = Marker::for_workout(&ride());

        assert_eq!(marker.at, Coordinates::new(39.0, -12.0));
        assert_eq!(marker.popup.max_width, 250);
        assert_eq!(marker.popup.min_width, 100);
        assert!(!marker.popup.auto_close);
        assert!(!marker.popup.close_on_click);
        assert_eq!(marker.popup.class_name, "cycling-popup");
        assert_eq!(marker.popup.content, "🚴‍♀️ Cycling on April 14");
    }

    #[test]
    fn pan_defaults_to_one_second_animation() {
        let pan = PanOptions::default();
        assert!(pan.animate);
        assert_eq!(pan.duration_secs, 1.0);
    }

    #[test]
    fn terminal_map_draws_markers_and_moves() {
        let mut map = TerminalMap::new(Vec::new());
        map.set_view(Coordinates::new(39.0, -12.0), DEFAULT_ZOOM, None);
        map.add_marker(&Marker::for_workout(&ride()));
        map.set_view(
            Coordinates::new(40.0, -11.0),
            DEFAULT_ZOOM,
            Some(PanOptions::default()),
        );

        let text = String::from_utf8(map.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("centered on 39.00000, -12.00000 (zoom 13)"));
        assert!(lines[0].contains(ATTRIBUTION));
        assert!(lines[1].contains("[cycling-popup] 🚴‍♀️ Cycling on April 14"));
        assert!(lines[2].contains("panning to 40.00000, -11.00000"));
    }

    #[test]
    fn clearing_an_empty_map_draws_nothing() {
        let mut map = TerminalMap::new(Vec::new());
        map.clear_markers();
        map.add_marker(&Marker::for_workout(&ride()));
        map.clear_markers();

        let text = String::from_utf8(map.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("map: markers cleared\n"));
    }
}
