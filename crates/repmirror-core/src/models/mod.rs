//! Data models for repmirror

mod activity;
mod record;
mod user;

pub use activity::{Activity, UserActivityCount};
pub use record::{ActivityDetail, PerformedRecord};
pub use user::User;
