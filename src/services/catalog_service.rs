use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository::{course, schedule};
use crate::error::AppError;
use crate::models::{
    Course, NewCourseRequest, NewScheduleRequest, Schedule, UpdateCourseRequest,
    UpdateScheduleRequest,
};

/// Course catalog plus the schedules each course owns.
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let mut courses = course::fetch_all(&self.db).await?;
        for c in courses.iter_mut() {
            c.schedule = schedule::fetch_for_course(&self.db, &c.id).await?;
        }
        Ok(courses)
    }

    pub async fn find_course(&self, course_id: &str) -> Result<Course, AppError> {
        let mut found = self.require_course(course_id).await?;
        found.schedule = schedule::fetch_for_course(&self.db, course_id).await?;
        Ok(found)
    }

    pub async fn create_course(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        let created = course::insert(&self.db, req).await?;
        info!("created course {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_course(
        &self,
        course_id: &str,
        req: UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        let mut updated = course::update(&self.db, course_id, req)
            .await?
            .ok_or_else(|| AppError::not_found("course"))?;
        updated.schedule = schedule::fetch_for_course(&self.db, course_id).await?;
        Ok(updated)
    }

    /// Deletes the course row. Its schedules and enrollments are not removed.
    pub async fn delete_course(&self, course_id: &str) -> Result<Course, AppError> {
        let deleted = course::delete(&self.db, course_id)
            .await?
            .ok_or_else(|| AppError::not_found("course"))?;
        info!("deleted course {}", course_id);
        Ok(deleted)
    }

    pub async fn list_schedules(&self, course_id: &str) -> Result<Vec<Schedule>, AppError> {
        self.require_course(course_id).await?;
        Ok(schedule::fetch_for_course(&self.db, course_id).await?)
    }

    pub async fn add_schedule(
        &self,
        course_id: &str,
        req: NewScheduleRequest,
    ) -> Result<Schedule, AppError> {
        self.require_course(course_id).await?;
        let created = schedule::insert(&self.db, course_id, req).await?;
        info!("added schedule {} to course {}", created.id, course_id);
        Ok(created)
    }

    pub async fn get_schedule(&self, course_id: &str, schedule_id: &str) -> Result<Schedule, AppError> {
        self.require_course(course_id).await?;
        self.require_schedule(course_id, schedule_id).await
    }

    pub async fn update_schedule(
        &self,
        course_id: &str,
        schedule_id: &str,
        req: UpdateScheduleRequest,
    ) -> Result<Schedule, AppError> {
        self.require_course(course_id).await?;
        self.require_schedule(course_id, schedule_id).await?;
        schedule::update(&self.db, schedule_id, req)
            .await?
            .ok_or_else(|| AppError::not_found("schedule"))
    }

    pub async fn delete_schedule(&self, course_id: &str, schedule_id: &str) -> Result<Schedule, AppError> {
        self.require_course(course_id).await?;
        self.require_schedule(course_id, schedule_id).await?;
        schedule::delete(&self.db, schedule_id)
            .await?
            .ok_or_else(|| AppError::not_found("schedule"))
    }

    async fn require_course(&self, course_id: &str) -> Result<Course, AppError> {
        course::find_by_id(&self.db, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("The course id is invalid or the course no longer exists".to_string()))
    }

    async fn require_schedule(&self, course_id: &str, schedule_id: &str) -> Result<Schedule, AppError> {
        match schedule::find_by_id(&self.db, schedule_id).await? {
            Some(s) if s.course_id == course_id => Ok(s),
            Some(s) => {
                warn!(
                    "schedule {} belongs to course {}, not {}",
                    schedule_id, s.course_id, course_id
                );
                Err(AppError::not_found("schedule"))
            }
            None => Err(AppError::not_found("schedule")),
        }
    }
}
