//! The entry form and workout list, as seen by the user.

use std::{fmt, io::Write};

use crate::form::FormFields;
use crate::model::{Workout, WorkoutKind, WorkoutType};

/// What the session needs from the form and list surface.
pub trait WorkoutView {
    /// Reveals the entry form with the distance field focused.
    fn show_form(&mut self);

    /// Clears the entry fields and hides the form.
    ///
    /// Distance, duration and cadence are emptied; elevation keeps its value.
    fn hide_form(&mut self);

    /// The fields as currently typed into the form.
    fn form_mut(&mut self) -> &mut FormFields;

    /// Swaps the visible type-specific field (cadence or elevation).
    fn toggle_type_field(&mut self);

    /// The type currently selected in the form.
    fn selected_type(&self) -> WorkoutType;

    /// Adds a workout to the list.
    fn render_workout(&mut self, item: &ListItem);

    /// Empties the list.
    fn clear_workouts(&mut self);

    /// Shows a message the user has to acknowledge.
    fn alert(&mut self, message: &str);
}

/// One row of workout details: icon, value, unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// A workout as shown in the list, tagged with its id for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub workout_type: WorkoutType,
    pub title: String,
    pub details: Vec<Detail>,
}

impl From<&Workout> for ListItem {
    fn from(workout: &Workout) -> Self {
        let kind = workout.workout_type();
        let mut details = vec![
            Detail::new(kind.emoji(), workout.distance_km().to_string(), "km"),
            Detail::new("⏱", workout.duration_min().to_string(), "min"),
        ];
        match *workout.kind() {
            WorkoutKind::Running {
                cadence,
                pace_min_per_km,
            } => {
                details.push(Detail::new("⚡️", format!("{pace_min_per_km:.1}"), "min/km"));
                details.push(Detail::new("🦶🏼", cadence.to_string(), "spm"));
            }
            WorkoutKind::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                details.push(Detail::new("⚡️", format!("{speed_km_per_h:.1}"), "km/h"));
                details.push(Detail::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }
        Self {
            id: workout.id().to_string(),
            workout_type: kind,
            title: workout.description().to_string(),
            details,
        }
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}\n   ", self.id, self.title)?;
        for d in &self.details {
            write!(f, " {} {} {}", d.icon, d.value, d.unit)?;
        }
        Ok(())
    }
}

/// Form and list drawn as lines of text.
pub struct TerminalView<W> {
    out: W,
    selected: WorkoutType,
    form: FormFields,
    form_visible: bool,
    listed: usize,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            selected: WorkoutType::Running,
            form: FormFields::default(),
            form_visible: false,
            listed: 0,
        }
    }

    #[cfg(test)]
    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a line, logging rather than failing if the terminal is gone.
    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "failed to write view output");
        }
    }

    fn extra_field(&self) -> &'static str {
        match self.selected {
            WorkoutType::Running => "CADENCE",
            WorkoutType::Cycling => "ELEVATION",
        }
    }
}

impl<W: Write> WorkoutView for TerminalView<W> {
    fn show_form(&mut self) {
        self.form_visible = true;
        let text = format!(
            "form: {} | submit DISTANCE DURATION {}",
            self.selected,
            self.extra_field()
        );
        self.line(&text);
    }

    fn hide_form(&mut self) {
        self.form.clear();
        if self.form_visible {
            self.form_visible = false;
            self.line("form: closed");
        }
    }

    fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    fn toggle_type_field(&mut self) {
        self.selected = self.selected.toggled();
        let text = format!("form: type is now {} ({})", self.selected, self.extra_field());
        self.line(&text);
    }

    fn selected_type(&self) -> WorkoutType {
        self.selected
    }

    fn render_workout(&mut self, item: &ListItem) {
        self.line(&item.to_string());
        self.listed += 1;
    }

    fn clear_workouts(&mut self) {
        if self.listed > 0 {
            self.listed = 0;
            self.line("list: cleared");
        }
    }

    fn alert(&mut self, message: &str) {
        let text = format!("⚠ {message}");
        self.line(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{civil::date, tz::TimeZone};

    use crate::model::Coordinates;

    fn created() -> jiff::Zoned {
        date(2024, 4, 14)
            .at(8, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn values(item: &ListItem) -> Vec<(&str, &str)> {
        item.details
            .iter()
            .map(|d| (d.value.as_str(), d.unit))
            .collect()
    }

    #[test]
    fn running_item_shows_pace_and_cadence() {
        let run = Workout::running_at(&created(), Coordinates::new(0.0, 0.0), 5.2, 24.0, 178.0);
        let item = ListItem::from(&run);

        assert_eq!(item.id, run.id());
        assert_eq!(item.title, "Running on April 14");
        assert_eq!(
            values(&item),
            [("5.2", "km"), ("24", "min"), ("4.6", "min/km"), ("178", "spm")]
        );
        assert_eq!(item.details[0].icon, "🏃‍♂️");
    }

    #[test]
    fn cycling_item_shows_speed_and_elevation() {
        let ride = Workout::cycling_at(&created(), Coordinates::new(0.0, 0.0), 27.0, 85.0, 523.0);
        let item = ListItem::from(&ride);

        assert_eq!(
            values(&item),
            [("27", "km"), ("85", "min"), ("19.1", "km/h"), ("523", "m")]
        );
        assert_eq!(item.details[3].icon, "⛰");
    }

    #[test]
    fn toggling_switches_extra_field() {
        let mut view = TerminalView::new(Vec::new());
        assert_eq!(view.selected_type(), WorkoutType::Running);

        view.toggle_type_field();
        assert_eq!(view.selected_type(), WorkoutType::Cycling);
        view.show_form();
        assert!(view.is_form_visible());

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("submit DISTANCE DURATION ELEVATION"));
    }

    #[test]
    fn renders_item_and_alert() {
        let run = Workout::running_at(&created(), Coordinates::new(0.0, 0.0), 5.0, 25.0, 170.0);
        let mut view = TerminalView::new(Vec::new());
        view.render_workout(&ListItem::from(&run));
        view.alert("Could not get your position");

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("Running on April 14"));
        assert!(text.contains("⏱ 25 min"));
        assert!(text.contains("⚠ Could not get your position"));
    }

    #[test]
    fn hiding_form_clears_all_but_elevation() {
        let mut view = TerminalView::new(Vec::new());
        view.show_form();
        *view.form_mut() = FormFields {
            kind: "cycling".into(),
            distance: "27".into(),
            duration: "85".into(),
            cadence: "90".into(),
            elevation: "523".into(),
        };

        view.hide_form();
        assert!(!view.is_form_visible());
        let form = view.form_mut();
        assert!(form.distance.is_empty() && form.duration.is_empty() && form.cadence.is_empty());
        assert_eq!(form.elevation, "523");
    }

    #[test]
    fn clearing_an_empty_list_draws_nothing() {
        let mut view = TerminalView::new(Vec::new());
        view.clear_workouts();

        assert!(view.into_inner().is_empty());
    }
}
