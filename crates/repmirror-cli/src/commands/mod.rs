pub mod activities;
pub mod common;
pub mod export;
pub mod sync;
