use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::repository::{self, course, enrollment};
use crate::error::AppError;
use crate::models::{
    EnrolledCourse, MAX_VIDEO_NUM, NewEnrollmentRequest, UpdateEnrollmentRequest, User,
};

/// Coordinates users, courses and enrollment records, and owns wishlist edits.
pub struct EnrollmentService {
    db: SqlitePool,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Enrolls `student_id` in the requested course.
    ///
    /// The record is built in full, with one unwatched slot per course video,
    /// before the single insert. Enrolling twice creates two records. A course
    /// whose stored video count is outside `0..=MAX_VIDEO_NUM` is refused.
    pub async fn enroll(
        &self,
        student_id: &str,
        req: NewEnrollmentRequest,
    ) -> Result<EnrolledCourse, AppError> {
        let course = course::find_by_id(&self.db, &req.course_id)
            .await?
            .ok_or_else(|| AppError::not_found("course"))?;

        if !(0..=MAX_VIDEO_NUM).contains(&course.video_num) {
            warn!("course {} has an invalid video count {}", course.id, course.video_num);
            return Err(AppError::Validation(format!(
                "course video_num {} is outside 0..={}",
                course.video_num, MAX_VIDEO_NUM
            )));
        }
        let slots = usize::try_from(course.video_num).unwrap_or(0);
        let now = repository::now();
        let enrolled = EnrolledCourse {
            id: repository::new_id(),
            student_id: student_id.to_string(),
            course_id: course.id,
            videos_watched: vec![false; slots],
            created_at: now.clone(),
            updated_at: now,
        };

        enrollment::insert(&self.db, &enrolled).await?;
        info!(
            "enrolled student {} in course {} ({} videos)",
            student_id, enrolled.course_id, slots
        );
        Ok(enrolled)
    }

    /// Single-field lookup when `course_id` is `None`, compound-key otherwise.
    /// `None` means nothing matched; it is not an error.
    pub async fn get_enrollment(
        &self,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<Option<EnrolledCourse>, AppError> {
        let found = match course_id {
            Some(course_id) => enrollment::find_by_key(&self.db, student_id, course_id).await?,
            None => enrollment::find_by_student(&self.db, student_id).await?,
        };
        Ok(found)
    }

    pub async fn update_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
        req: UpdateEnrollmentRequest,
    ) -> Result<EnrolledCourse, AppError> {
        enrollment::update_by_key(&self.db, student_id, course_id, req)
            .await?
            .ok_or_else(|| AppError::not_found("enrollment"))
    }

    pub async fn delete_enrollment(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<EnrolledCourse, AppError> {
        let removed = enrollment::delete_by_key(&self.db, student_id, course_id)
            .await?
            .ok_or_else(|| AppError::not_found("enrollment"))?;
        info!("removed enrollment of student {} from course {}", student_id, course_id);
        Ok(removed)
    }

    pub async fn wishlist(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self.load_user(user_id).await?.wishlist)
    }

    /// Appends without checking for duplicates or for the course's existence.
    pub async fn add_to_wishlist(&self, user_id: &str, course_id: &str) -> Result<User, AppError> {
        let mut user = self.load_user(user_id).await?;
        user.wishlist.push(course_id.to_string());
        self.save_wishlist(&mut user).await?;
        debug!("user {} wishlisted course {}", user_id, course_id);
        Ok(user)
    }

    /// Drops every entry equal to `wish_id`. Unknown ids leave the list as is.
    pub async fn remove_from_wishlist(&self, user_id: &str, wish_id: &str) -> Result<User, AppError> {
        let mut user = self.load_user(user_id).await?;
        let before = user.wishlist.len();
        user.wishlist.retain(|id| id != wish_id);
        if user.wishlist.len() != before {
            self.save_wishlist(&mut user).await?;
            debug!("user {} removed {} from wishlist", user_id, wish_id);
        }
        Ok(user)
    }

    async fn load_user(&self, user_id: &str) -> Result<User, AppError> {
        repository::user::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))
    }

    async fn save_wishlist(&self, user: &mut User) -> Result<(), AppError> {
        user.updated_at = repository::now();
        if !repository::user::save_wishlist(&self.db, user).await? {
            return Err(AppError::not_found("user"));
        }
        Ok(())
    }
}
