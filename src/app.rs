//! Application event loop: UI events in, session calls out.
//!
//! Every user-facing surface (the interactive prompt, one-shot CLI commands)
//! feeds [`UiEvent`]s through [`App::dispatch`]. Each event maps onto one
//! synchronous session method. Errors come back to the caller, and
//! [`App::handle`] turns them into alerts instead of aborting.

use crate::form::FormFields;
use crate::geolocation::{GeolocationError, Geolocator};
use crate::map::MapView;
use crate::model::Coordinates;
use crate::session::{EntryError, Session};
use crate::storage::{BlobStore, StorageError};
use crate::view::WorkoutView;

/// Something the user (or the environment) did.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The one-shot position lookup finished.
    PositionAcquired(Result<Coordinates, GeolocationError>),

    /// The map was clicked.
    MapClicked(Coordinates),

    /// The form's type selector changed.
    TypeChanged,

    /// The entry form was submitted.
    Submitted(FormFields),

    /// A workout in the list was clicked.
    EntryClicked(String),

    /// Erase all data and start over.
    Reset,

    Quit,
}

/// Whether the loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Position(#[from] GeolocationError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A session wired to its position source and a way to open a map.
pub struct App<S, V, M, G, F> {
    session: Session<S, V, M>,
    geolocator: G,
    open_map: F,
}

impl<S, V, M, G, F> App<S, V, M, G, F>
where
    S: BlobStore,
    V: WorkoutView,
    M: MapView,
    G: Geolocator,
    F: FnMut() -> M,
{
    pub fn new(session: Session<S, V, M>, geolocator: G, open_map: F) -> Self {
        Self {
            session,
            geolocator,
            open_map,
        }
    }

    /// Startup: restore saved workouts, then look up the position and open the map.
    ///
    /// The list is rendered before the map exists; markers follow once it does.
    /// A storage failure does not stop the map from opening.
    pub fn start(&mut self) -> Result<(), AppError> {
        let restored = self.session.restore();
        let position = self.geolocator.current_position();
        self.dispatch(UiEvent::PositionAcquired(position))?;
        restored?;
        Ok(())
    }

    /// Routes one event to the session.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Flow, AppError> {
        match event {
            UiEvent::PositionAcquired(Ok(center)) => {
                let mut map = (self.open_map)();
                map.set_view(center, self.session.zoom(), None);
                self.session.attach_map(map);
            }
            UiEvent::PositionAcquired(Err(e)) => return Err(e.into()),
            UiEvent::MapClicked(at) => self.session.begin_entry(at)?,
            UiEvent::TypeChanged => self.session.view_mut().toggle_type_field(),
            UiEvent::Submitted(fields) => {
                self.session.submit_entry(&fields)?;
            }
            UiEvent::EntryClicked(id) => {
                self.session.locate_entry(&id);
            }
            UiEvent::Reset => {
                self.session.reset_all()?;
                self.start()?;
            }
            UiEvent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Dispatches an event, showing any error as an alert.
    pub fn handle(&mut self, event: UiEvent) -> Flow {
        match self.dispatch(event) {
            Ok(flow) => flow,
            Err(e) => {
                tracing::debug!(error = %e, "event rejected");
                self.session.view_mut().alert(&e.to_string());
                Flow::Continue
            }
        }
    }

    pub fn session(&self) -> &Session<S, V, M> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S, V, M> {
        &mut self.session
    }
}
