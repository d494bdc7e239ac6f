pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod snapshot;

pub use config::{Growth, Settings};
pub use cursor::{Cursor, Neighborhood};
pub use engine::{Automaton, Rule};
pub use error::Error;
pub use grid::Grid;
pub use snapshot::Snapshot;
