use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Join record between a user and a course.
///
/// `videos_watched` has one slot per course video as counted at enrollment
/// time. Later edits to the course's `video_num` are not reflected here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    #[sqlx(json)]
    pub videos_watched: Vec<bool>,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEnrollmentRequest {
    #[serde(rename = "courseId")]
    #[validate(length(min = 1, message = "courseId must not be empty"))]
    pub course_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEnrollmentRequest {
    #[serde(rename = "videosWatched")]
    pub videos_watched: Option<Vec<bool>>,
}
