//! repmirror-core - Core library for repmirror
//!
//! This crate contains the store, the Fitocracy client, the sync pipeline and
//! the CSV export projection used by the `repmirror` command-line tool.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod mapper;
pub mod models;
pub mod remote;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use mapper::{ExerciseMapper, ExerciseMapping};
pub use models::{Activity, ActivityDetail, PerformedRecord, User, UserActivityCount};
