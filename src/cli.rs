//! CLI interface for Mapty.
//!
//! One-shot commands (`add`, `list`, `locate`, `reset`) run a single step of
//! the session and exit. `mapty session` runs the interactive event loop.
//! Either way, every change goes through the same session store.

mod entry;
mod interactive;

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::app::App;
use crate::config::Config;
use crate::geolocation::FixedPosition;
use crate::map::TerminalMap;
use crate::model::Coordinates;
use crate::session::Session;
use crate::storage::FileStore;
use crate::view::TerminalView;

/// Mapty: log runs and rides on a map.
#[derive(Debug, Parser)]
#[command(name = "mapty", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Directory holding saved workouts. Overrides `storage-dir` in the config.
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Your current position, as LAT,LNG. Overrides `position` in the config.
    #[arg(long, global = true, value_name = "LAT,LNG", allow_hyphen_values = true)]
    position: Option<Coordinates>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q).
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow:
  mapty add running --at 51.5,-0.12 --distance 5.2 --duration 24 --cadence 178
    → prints the workout ID
  mapty add cycling --at 51.5,-0.12 --distance 27 --duration 85 --elevation 523
  mapty list
  mapty --position 51.5,-0.12 locate <ID>
  mapty --position 51.5,-0.12 session";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a workout at a location. Prints the workout ID.
    Add {
        /// Workout type: `running` or `cycling`.
        kind: String,

        /// Where the workout happened, as LAT,LNG.
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Coordinates,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Steps per minute (running).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        cadence: String,

        /// Elevation gain in meters (cycling).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        elevation: String,
    },

    /// List saved workouts, oldest first.
    List,

    /// Center the map on a saved workout. Requires a position.
    Locate {
        /// Workout ID, as printed by `add` and `list`.
        id: String,
    },

    /// Erase every saved workout.
    Reset,

    /// Interactive session: click the map, fill the form, browse the list.
    Session,
}

/// Flags and config merged: flags win.
struct Settings {
    storage_dir: PathBuf,
    position: Option<Coordinates>,
    zoom: u8,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Result<Self, String> {
        let storage_dir = cli
            .store
            .clone()
            .or_else(|| config.storage_dir.clone())
            .or_else(FileStore::default_root)
            .ok_or("could not determine home directory; pass --store <DIR>")?;
        Ok(Self {
            storage_dir,
            position: cli.position.or(config.position),
            zoom: config.zoom_level,
        })
    }

    fn open_store(&self) -> Result<FileStore, String> {
        FileStore::new(&self.storage_dir).map_err(|e| {
            format!(
                "failed to open storage at {}: {e}",
                self.storage_dir.display()
            )
        })
    }
}

type TerminalSession<W> = Session<FileStore, TerminalView<W>, TerminalMap<W>>;

/// A file-backed session drawing to whatever `out` opens.
fn terminal_session<W: Write>(
    settings: &Settings,
    out: fn() -> W,
) -> Result<TerminalSession<W>, String> {
    let store = settings.open_store()?;
    Ok(Session::new(store, TerminalView::new(out()), settings.zoom))
}

fn terminal_app<W: Write>(
    settings: &Settings,
    position: Option<Coordinates>,
    out: fn() -> W,
) -> Result<
    App<FileStore, TerminalView<W>, TerminalMap<W>, FixedPosition, impl FnMut() -> TerminalMap<W>>,
    String,
> {
    let session = terminal_session(settings, out)?;
    Ok(App::new(session, FixedPosition(position), move || {
        TerminalMap::new(out())
    }))
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let settings = Settings::resolve(&cli, config)?;

    match cli.command {
        Command::Add {
            kind,
            at,
            distance,
            duration,
            cadence,
            elevation,
        } => entry::cmd_add(
            &settings,
            at,
            crate::form::FormFields {
                kind,
                distance,
                duration,
                cadence,
                elevation,
            },
        ),
        Command::List => entry::cmd_list(&settings),
        Command::Locate { id } => entry::cmd_locate(&settings, &id),
        Command::Reset => entry::cmd_reset(&settings),
        Command::Session => interactive::cmd_session(&settings),
    }
}
