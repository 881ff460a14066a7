//! One-shot workout commands: add, list, locate, reset.

use std::io;

use crate::app::{App, UiEvent};
use crate::form::FormFields;
use crate::geolocation::Geolocator;
use crate::map::MapView;
use crate::model::Coordinates;
use crate::storage::BlobStore;
use crate::view::WorkoutView;

use super::{Settings, terminal_app, terminal_session};

/// Adds a workout and prints only its ID on stdout.
///
/// Map and form output goes to stderr so the ID can be captured.
pub(super) fn cmd_add(settings: &Settings, at: Coordinates, fields: FormFields) -> Result<(), String> {
    // Without a known position the map opens on the workout itself.
    let position = settings.position.or(Some(at));
    let mut app = terminal_app(settings, position, io::stderr)?;
    let id = add_workout(&mut app, at, fields)?;
    println!("{id}");
    Ok(())
}

/// Starts the app, clicks `at` and submits `fields`, returning the new ID.
fn add_workout<S, V, M, G, F>(
    app: &mut App<S, V, M, G, F>,
    at: Coordinates,
    fields: FormFields,
) -> Result<String, String>
where
    S: BlobStore,
    V: WorkoutView,
    M: MapView,
    G: Geolocator,
    F: FnMut() -> M,
{
    app.start().map_err(|e| format!("failed to start session: {e}"))?;

    app.dispatch(UiEvent::MapClicked(at))
        .map_err(|e| e.to_string())?;
    app.dispatch(UiEvent::Submitted(fields))
        .map_err(|e| e.to_string())?;

    app.session()
        .workouts()
        .last()
        .map(|w| w.id().to_string())
        .ok_or_else(|| "workout was not recorded".to_string())
}

pub(super) fn cmd_list(settings: &Settings) -> Result<(), String> {
    let mut session = terminal_session(settings, io::stdout)?;
    let count = session
        .restore()
        .map_err(|e| format!("failed to load workouts: {e}"))?;

    if count == 0 {
        println!("No workouts");
    }
    Ok(())
}

pub(super) fn cmd_locate(settings: &Settings, id: &str) -> Result<(), String> {
    let mut app = terminal_app(settings, settings.position, io::stdout)?;
    app.start().map_err(|e| e.to_string())?;

    if app.session().find(id).is_none() {
        return Err(format!("no workout with ID '{id}'"));
    }
    app.dispatch(UiEvent::EntryClicked(id.to_string()))
        .map_err(|e| e.to_string())?;
    Ok(())
}

pub(super) fn cmd_reset(settings: &Settings) -> Result<(), String> {
    let mut session = terminal_session(settings, io::stderr)?;
    session
        .reset_all()
        .map_err(|e| format!("failed to reset: {e}"))?;

    eprintln!("All workouts erased");
    Ok(())
}
