//! Recording doubles for the view and map collaborators.

use crate::form::FormFields;
use crate::map::{MapView, Marker, PanOptions};
use crate::model::{Coordinates, WorkoutType};
use crate::view::{ListItem, WorkoutView};

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    View {
        center: Coordinates,
        zoom: u8,
        pan: Option<PanOptions>,
    },
    Marker {
        at: Coordinates,
        class_name: String,
        content: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
}

impl MapView for RecordingMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8, pan: Option<PanOptions>) {
        self.calls.push(MapCall::View { center, zoom, pan });
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.calls.push(MapCall::Marker {
            at: marker.at,
            class_name: marker.popup.class_name.clone(),
            content: marker.popup.content.clone(),
        });
    }

    fn clear_markers(&mut self) {
        self.calls.retain(|c| !matches!(c, MapCall::Marker { .. }));
    }
}

#[derive(Debug)]
pub struct RecordingView {
    pub selected: WorkoutType,
    pub form: FormFields,
    pub forms_shown: usize,
    pub forms_hidden: usize,
    pub lists_cleared: usize,
    pub rendered: Vec<ListItem>,
    pub alerts: Vec<String>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            selected: WorkoutType::Running,
            form: FormFields::default(),
            forms_shown: 0,
            forms_hidden: 0,
            lists_cleared: 0,
            rendered: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl WorkoutView for RecordingView {
    fn show_form(&mut self) {
        self.forms_shown += 1;
    }

    fn hide_form(&mut self) {
        self.form.clear();
        self.forms_hidden += 1;
    }

    fn form_mut(&mut self) -> &mut FormFields {
        &mut self.form
    }

    fn toggle_type_field(&mut self) {
        self.selected = self.selected.toggled();
    }

    fn selected_type(&self) -> WorkoutType {
        self.selected
    }

    fn render_workout(&mut self, item: &ListItem) {
        self.rendered.push(item.clone());
    }

    fn clear_workouts(&mut self) {
        self.lists_cleared += 1;
        self.rendered.clear();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
