//! Core data model for Mapty.
//!
//! A workout is one recorded exercise session pinned to a map location.
//! The common record lives on [`Workout`]; what differs between running
//! and cycling lives on [`WorkoutKind`].

mod coordinates;
mod workout;

pub use coordinates::Coordinates;
pub use workout::{UnknownWorkoutType, Workout, WorkoutKind, WorkoutType};
