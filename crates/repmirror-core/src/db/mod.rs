//! Database layer for repmirror

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{LibSqlWorkoutRepository, WorkoutRepository};
