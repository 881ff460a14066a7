//! Interactive session: a line-oriented stand-in for clicking and typing.
//!
//! Each input line becomes one [`UiEvent`] (or a view-only command such as
//! `list`) and goes through the same dispatch as any other surface.

use std::io::{self, BufRead, Write};

use crate::app::{App, Flow, UiEvent};
use crate::form::FormFields;
use crate::geolocation::Geolocator;
use crate::map::MapView;
use crate::model::{Coordinates, WorkoutType};
use crate::storage::BlobStore;
use crate::view::{ListItem, WorkoutView};

use super::{Settings, terminal_app};

const HELP: &str = "\
Commands:
  click LAT LNG                  pick a location on the map and open the form
  type                           switch the form between running and cycling
  submit DISTANCE DURATION [X]   submit the form (X is cadence or elevation;
                                 left out, the form's current value is used)
  submit TYPE DISTANCE DURATION X
  locate ID                      center the map on a workout
  list                           show all workouts
  reset                          erase everything and start over
  help                           show this help
  quit                           leave";

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum Input {
    Event(UiEvent),
    Submit {
        kind: Option<String>,
        distance: String,
        duration: String,
        extra: Option<String>,
    },
    List,
    Help,
    Blank,
}

fn parse_line(line: &str) -> Result<Input, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(Input::Blank);
    };

    match (command, args) {
        ("click", [lat, lng]) => {
            let at: Coordinates = format!("{lat},{lng}").parse().map_err(|e| format!("{e}"))?;
            Ok(Input::Event(UiEvent::MapClicked(at)))
        }
        ("type", []) => Ok(Input::Event(UiEvent::TypeChanged)),
        ("submit", [distance, duration]) => Ok(Input::Submit {
            kind: None,
            distance: (*distance).to_string(),
            duration: (*duration).to_string(),
            extra: None,
        }),
        ("submit", [distance, duration, extra]) => Ok(Input::Submit {
            kind: None,
            distance: (*distance).to_string(),
            duration: (*duration).to_string(),
            extra: Some((*extra).to_string()),
        }),
        ("submit", [kind, distance, duration, extra]) => Ok(Input::Submit {
            kind: Some((*kind).to_string()),
            distance: (*distance).to_string(),
            duration: (*duration).to_string(),
            extra: Some((*extra).to_string()),
        }),
        ("locate", [id]) => Ok(Input::Event(UiEvent::EntryClicked((*id).to_string()))),
        ("list", []) => Ok(Input::List),
        ("reset", []) => Ok(Input::Event(UiEvent::Reset)),
        ("help", []) => Ok(Input::Help),
        ("quit" | "exit", []) => Ok(Input::Event(UiEvent::Quit)),
        _ => Err(format!("unrecognized command: {line:?} (try `help`)")),
    }
}

/// Types a submission into the form, as the user would.
///
/// The extra value lands in whichever field the chosen type shows. Fields
/// not typed keep what the form already holds.
fn fill_form(
    form: &mut FormFields,
    selected: WorkoutType,
    kind: Option<String>,
    distance: String,
    duration: String,
    extra: Option<String>,
) {
    form.kind = kind.unwrap_or_else(|| selected.as_str().to_string());
    form.distance = distance;
    form.duration = duration;
    if let Some(extra) = extra {
        if form.kind == WorkoutType::Cycling.as_str() {
            form.elevation = extra;
        } else {
            form.cadence = extra;
        }
    }
}

/// Reads commands until `quit` or end of input.
fn run<S, V, M, G, F, R, W>(app: &mut App<S, V, M, G, F>, input: R, out: &mut W) -> io::Result<()>
where
    S: BlobStore,
    V: WorkoutView,
    M: MapView,
    G: Geolocator,
    F: FnMut() -> M,
    R: BufRead,
    W: Write,
{
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let event = match parse_line(&line) {
            Ok(Input::Event(event)) => Some(event),
            Ok(Input::Submit {
                kind,
                distance,
                duration,
                extra,
            }) => {
                let view = app.session_mut().view_mut();
                let selected = view.selected_type();
                let form = view.form_mut();
                fill_form(form, selected, kind, distance, duration, extra);
                Some(UiEvent::Submitted(form.clone()))
            }
            Ok(Input::List) => {
                let items: Vec<ListItem> =
                    app.session().workouts().iter().map(ListItem::from).collect();
                if items.is_empty() {
                    writeln!(out, "No workouts")?;
                }
                for item in &items {
                    app.session_mut().view_mut().render_workout(item);
                }
                None
            }
            Ok(Input::Help) => {
                writeln!(out, "{HELP}")?;
                None
            }
            Ok(Input::Blank) => None,
            Err(message) => {
                writeln!(out, "{message}")?;
                None
            }
        };

        if let Some(event) = event
            && app.handle(event) == Flow::Quit
        {
            return Ok(());
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

pub(super) fn cmd_session(settings: &Settings) -> Result<(), String> {
    let mut app = terminal_app(settings, settings.position, io::stdout)?;
    if let Err(e) = app.start() {
        app.session_mut().view_mut().alert(&e.to_string());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(&mut app, stdin.lock(), &mut stdout).map_err(|e| format!("terminal error: {e}"))
}
