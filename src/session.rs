//! The session store: the in-memory workout list and everything that touches it.
//!
//! A session owns the list, the storage it is persisted to, the view it is
//! drawn in, and (once position is known) the map. Every operation is a plain
//! synchronous method; event routing lives in [`crate::app`].
//!
//! Entry flow, per pending location:
//!
//! ```text
//! Idle --begin_entry--> AwaitingInput --submit ok--> Idle
//!                            ^   |
//!                            +---+ submit rejected (location kept)
//! ```

use crate::form::{FormError, FormFields};
use crate::map::{MapView, Marker, PanOptions};
use crate::model::{Coordinates, Workout};
use crate::storage::{BlobStore, StorageError};
use crate::view::{ListItem, WorkoutView};

/// The storage key holding the serialized workout list.
pub const STORAGE_KEY: &str = "workouts";

/// Reasons an entry can't be started or committed.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("the map is not ready yet")]
    MapNotReady,

    #[error("pick a location on the map first")]
    NoPendingLocation,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("failed to save workouts: {0}")]
    Storage(#[from] StorageError),
}

/// The workout list plus its collaborators.
pub struct Session<S, V, M> {
    store: S,
    view: V,
    map: Option<M>,
    zoom: u8,

    /// Insertion order is display order.
    workouts: Vec<Workout>,

    /// Where the map was last clicked, until an entry is committed there.
    pending: Option<Coordinates>,
}

impl<S: BlobStore, V: WorkoutView, M: MapView> Session<S, V, M> {
    /// Creates an empty session. Call [`Session::restore`] to load saved workouts.
    pub fn new(store: S, view: V, zoom: u8) -> Self {
        Self {
            store,
            view,
            map: None,
            zoom,
            workouts: Vec::new(),
            pending: None,
        }
    }

    /// Hands the session a map that has been centered and is ready for markers.
    ///
    /// Markers for every workout already in the list are drawn now.
    pub fn attach_map(&mut self, mut map: M) {
        for workout in &self.workouts {
            map.add_marker(&Marker::for_workout(workout));
        }
        tracing::debug!(markers = self.workouts.len(), "map attached");
        self.map = Some(map);
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_some()
    }

    /// Starts an entry at a clicked map location and reveals the form.
    ///
    /// A later click replaces the pending location.
    pub fn begin_entry(&mut self, at: Coordinates) -> Result<(), EntryError> {
        if !self.is_map_ready() {
            return Err(EntryError::MapNotReady);
        }
        self.pending = Some(at);
        self.view.show_form();
        Ok(())
    }

    /// Validates the form and commits a workout at the pending location.
    ///
    /// On rejection nothing changes and the pending location is kept, so the
    /// user can correct the form and submit again. On success the workout is
    /// appended, drawn on the map and in the list, and the whole list is saved.
    pub fn submit_entry(&mut self, fields: &FormFields) -> Result<&Workout, EntryError> {
        let at = self.pending.ok_or(EntryError::NoPendingLocation)?;
        let input = fields.parse()?;

        let workout = input.into_workout(at);
        tracing::debug!(
            id = workout.id(),
            kind = %workout.workout_type(),
            created = %workout.created_at(),
            "workout added"
        );

        if let Some(map) = self.map.as_mut() {
            map.add_marker(&Marker::for_workout(&workout));
        }
        self.view.render_workout(&ListItem::from(&workout));
        self.view.hide_form();
        self.pending = None;

        let index = self.workouts.len();
        self.workouts.push(workout);
        self.persist()?;
        Ok(&self.workouts[index])
    }

    /// Centers the map on a listed workout.
    ///
    /// Returns `false` without moving anything if the id is unknown or the
    /// map isn't ready.
    pub fn locate_entry(&mut self, id: &str) -> bool {
        let Some(workout) = self.find(id) else {
            tracing::debug!(id, "no workout with this id");
            return false;
        };
        let at = workout.coordinates();
        let Some(map) = self.map.as_mut() else {
            return false;
        };
        map.set_view(at, self.zoom, Some(PanOptions::default()));
        true
    }

    /// Writes the entire list to storage, replacing what was there.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.workouts)?;
        self.store.set_item(STORAGE_KEY, &blob)
    }

    /// Loads the saved list, replacing the in-memory one, and renders it.
    ///
    /// Whatever was listed or pinned before is cleared first. A missing blob
    /// leaves the list empty. So does a blob that fails to parse; that case
    /// is logged. Markers are drawn only if a map is already attached;
    /// otherwise [`Session::attach_map`] draws them.
    /// Returns the number of workouts loaded.
    pub fn restore(&mut self) -> Result<usize, StorageError> {
        let blob = self.store.get_item(STORAGE_KEY)?;

        self.workouts.clear();
        self.view.clear_workouts();
        if let Some(map) = self.map.as_mut() {
            map.clear_markers();
        }

        let Some(blob) = blob else {
            return Ok(0);
        };
        let workouts: Vec<Workout> = match serde_json::from_str(&blob) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(error = %e, "stored workouts are unreadable; starting empty");
                return Ok(0);
            }
        };

        self.workouts = workouts;
        for workout in &self.workouts {
            self.view.render_workout(&ListItem::from(workout));
            if let Some(map) = self.map.as_mut() {
                map.add_marker(&Marker::for_workout(workout));
            }
        }
        tracing::debug!(count = self.workouts.len(), "workouts restored");
        Ok(self.workouts.len())
    }

    /// Erases everything: stored blob, list, pending entry and map.
    ///
    /// The session is left as if freshly started with no saved data;
    /// a new map has to be attached before entries can be made.
    pub fn reset_all(&mut self) -> Result<(), StorageError> {
        self.store.remove_item(STORAGE_KEY)?;
        self.workouts.clear();
        self.pending = None;
        self.map = None;
        self.view.hide_form();
        self.view.clear_workouts();
        tracing::debug!("session reset");
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn pending(&self) -> Option<Coordinates> {
        self.pending
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
