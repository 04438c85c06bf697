use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{new_id, now};
use crate::models::{Course, NewCourseRequest, UpdateCourseRequest};

const COLUMNS: &str = "id, name, price, start_date, end_date, duration, active, coupons, \
    student_num, mentor, video_num, assignments, no_of_enrollments, sharable_link, \
    created_at, updated_at";

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {} FROM courses ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {} FROM courses WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, req: NewCourseRequest) -> Result<Course, sqlx::Error> {
    let now = now();
    let course = Course {
        id: new_id(),
        name: req.name,
        price: req.price,
        start_date: req.start_date.unwrap_or_else(|| now.clone()),
        end_date: req.end_date,
        duration: req.duration,
        active: req.active,
        coupons: req.coupons,
        student_num: 0,
        mentor: req.mentor,
        video_num: req.video_num,
        assignments: req.assignments,
        no_of_enrollments: 0,
        sharable_link: req.sharable_link,
        created_at: now.clone(),
        updated_at: now,
        schedule: Vec::new(),
    };

    sqlx::query(&format!(
        "INSERT INTO courses ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&course.id)
    .bind(&course.name)
    .bind(course.price)
    .bind(&course.start_date)
    .bind(&course.end_date)
    .bind(&course.duration)
    .bind(course.active)
    .bind(course.coupons)
    .bind(course.student_num)
    .bind(Json(&course.mentor))
    .bind(course.video_num)
    .bind(Json(&course.assignments))
    .bind(course.no_of_enrollments)
    .bind(&course.sharable_link)
    .bind(&course.created_at)
    .bind(&course.updated_at)
    .execute(db)
    .await?;

    Ok(course)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateCourseRequest,
) -> Result<Option<Course>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(c) => c,
        None => return Ok(None),
    };

    if let Some(name) = req.name {
        current.name = name;
    }
    if let Some(price) = req.price {
        current.price = price;
    }
    if let Some(start_date) = req.start_date {
        current.start_date = start_date;
    }
    if req.end_date.is_some() {
        current.end_date = req.end_date;
    }
    if req.duration.is_some() {
        current.duration = req.duration;
    }
    if let Some(active) = req.active {
        current.active = active;
    }
    if req.coupons.is_some() {
        current.coupons = req.coupons;
    }
    if let Some(student_num) = req.student_num {
        current.student_num = student_num;
    }
    if let Some(mentor) = req.mentor {
        current.mentor = mentor;
    }
    if let Some(video_num) = req.video_num {
        current.video_num = video_num;
    }
    if let Some(assignments) = req.assignments {
        current.assignments = assignments;
    }
    if let Some(no_of_enrollments) = req.no_of_enrollments {
        current.no_of_enrollments = no_of_enrollments;
    }
    if req.sharable_link.is_some() {
        current.sharable_link = req.sharable_link;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `course`. `false` when the row is gone.
async fn save(db: &SqlitePool, course: &Course) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query(
        r#"
        UPDATE courses
        SET name = ?, price = ?, start_date = ?, end_date = ?, duration = ?,
            active = ?, coupons = ?, student_num = ?, mentor = ?, video_num = ?,
            assignments = ?, no_of_enrollments = ?, sharable_link = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&course.name)
    .bind(course.price)
    .bind(&course.start_date)
    .bind(&course.end_date)
    .bind(&course.duration)
    .bind(course.active)
    .bind(course.coupons)
    .bind(course.student_num)
    .bind(Json(&course.mentor))
    .bind(course.video_num)
    .bind(Json(&course.assignments))
    .bind(course.no_of_enrollments)
    .bind(&course.sharable_link)
    .bind(&course.updated_at)
    .bind(&course.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

/// Removes the course row only. Schedules and enrollments pointing at it stay.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    let Some(course) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(course))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db")
    }

    fn dsa() -> NewCourseRequest {
        NewCourseRequest {
            name: "DSA".to_string(),
            price: 100.0,
            start_date: None,
            end_date: None,
            duration: Some("8 weeks".to_string()),
            active: true,
            coupons: None,
            mentor: vec!["Alice".to_string()],
            video_num: 5,
            assignments: vec!["https://example.com/a1.pdf".to_string()],
            sharable_link: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_course() {
        let pool = setup_test_db().await;

        let course = insert(&pool, dsa()).await.expect("Failed to insert course");
        assert_eq!(course.name, "DSA");
        assert_eq!(course.video_num, 5);
        assert_eq!(course.student_num, 0);
        assert_eq!(course.start_date, course.created_at);

        let courses = fetch_all(&pool).await.expect("Failed to fetch courses");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, course.id);
        assert_eq!(courses[0].mentor, vec!["Alice".to_string()]);
        assert_eq!(courses[0].assignments.len(), 1);
    }

    #[tokio::test]
    async fn test_update_course_keeps_absent_fields() {
        let pool = setup_test_db().await;
        let course = insert(&pool, dsa()).await.expect("Failed to insert course");

        let patch = UpdateCourseRequest {
            price: Some(250.0),
            video_num: Some(12),
            ..Default::default()
        };
        let updated = update(&pool, &course.id, patch)
            .await
            .expect("Failed to update course")
            .expect("Course not found");

        assert_eq!(updated.price, 250.0);
        assert_eq!(updated.video_num, 12);
        assert_eq!(updated.name, "DSA");
        assert_eq!(updated.duration.as_deref(), Some("8 weeks"));

        let stored = find_by_id(&pool, &course.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 250.0);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_course() {
        let pool = setup_test_db().await;

        let updated = update(&pool, "missing", UpdateCourseRequest::default())
            .await
            .expect("update should not fail");
        assert!(updated.is_none());

        let deleted = delete(&pool, "missing").await.expect("delete should not fail");
        assert!(deleted.is_none());
    }

    #[tokio::test]
    async fn test_delete_course() {
        let pool = setup_test_db().await;
        let course = insert(&pool, dsa()).await.unwrap();

        let deleted = delete(&pool, &course.id).await.unwrap().expect("Course not deleted");
        assert_eq!(deleted.id, course.id);
        assert!(find_by_id(&pool, &course.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_reports_missing_row() {
        let pool = setup_test_db().await;
        let mut course = insert(&pool, dsa()).await.unwrap();
        course.price = 10.0;
        assert!(save(&pool, &course).await.unwrap());

        delete(&pool, &course.id).await.unwrap();
        assert!(!save(&pool, &course).await.unwrap());
        assert!(find_by_id(&pool, &course.id).await.unwrap().is_none());
    }
}
