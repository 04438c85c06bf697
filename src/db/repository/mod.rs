pub mod announcement;
pub mod assignment;
pub mod course;
pub mod doubt;
pub mod enrollment;
pub mod schedule;
pub mod user;

use chrono::Utc;
use uuid::Uuid;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339()
}
