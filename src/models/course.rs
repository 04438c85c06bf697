use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Schedule;

/// Upper bound on a course's video count; enrollments hold one slot per video.
pub const MAX_VIDEO_NUM: i64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub start_date: String,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    pub active: bool,
    pub coupons: Option<i64>,
    pub student_num: i64,
    #[sqlx(json)]
    pub mentor: Vec<String>,
    pub video_num: i64,
    /// Links to the assignment question sheets.
    #[sqlx(json)]
    pub assignments: Vec<String>,
    pub no_of_enrollments: i64,
    pub sharable_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Filled in by the catalog on read; not a column.
    #[sqlx(skip)]
    #[serde(default)]
    pub schedule: Vec<Schedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCourseRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub coupons: Option<i64>,
    #[serde(default)]
    pub mentor: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_VIDEO_NUM, message = "video_num must be between 0 and 10000"))]
    pub video_num: i64,
    #[serde(default)]
    pub assignments: Vec<String>,
    pub sharable_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    pub active: Option<bool>,
    pub coupons: Option<i64>,
    pub student_num: Option<i64>,
    pub mentor: Option<Vec<String>>,
    #[validate(range(min = 0, max = MAX_VIDEO_NUM, message = "video_num must be between 0 and 10000"))]
    pub video_num: Option<i64>,
    pub assignments: Option<Vec<String>>,
    pub no_of_enrollments: Option<i64>,
    pub sharable_link: Option<String>,
}
