use sqlx::SqlitePool;
use sqlx::types::Json;

use super::now;
use crate::models::{EnrolledCourse, UpdateEnrollmentRequest};

const COLUMNS: &str = "id, student_id, course_id, videos_watched, created_at, updated_at";

/// First enrollment of a student, oldest first.
pub async fn find_by_student(
    db: &SqlitePool,
    student_id: &str,
) -> Result<Option<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(&format!(
        "SELECT {} FROM enrolled_courses WHERE student_id = ? \
         ORDER BY created_at ASC, rowid ASC LIMIT 1",
        COLUMNS
    ))
    .bind(student_id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
pub async fn fetch_by_student(
    db: &SqlitePool,
    student_id: &str,
) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(&format!(
        "SELECT {} FROM enrolled_courses WHERE student_id = ? ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .bind(student_id)
    .fetch_all(db)
    .await
}

/// Compound-key lookup. Duplicate enrollments are possible; the oldest wins.
pub async fn find_by_key(
    db: &SqlitePool,
    student_id: &str,
    course_id: &str,
) -> Result<Option<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(&format!(
        "SELECT {} FROM enrolled_courses WHERE student_id = ? AND course_id = ? \
         ORDER BY created_at ASC, rowid ASC LIMIT 1",
        COLUMNS
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
pub async fn fetch_by_course(
    db: &SqlitePool,
    course_id: &str,
) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(&format!(
        "SELECT {} FROM enrolled_courses WHERE course_id = ? ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .bind(course_id)
    .fetch_all(db)
    .await
}

/// Persists a fully built record in one statement.
pub async fn insert(db: &SqlitePool, enrolled: &EnrolledCourse) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "INSERT INTO enrolled_courses ({}) VALUES (?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&enrolled.id)
    .bind(&enrolled.student_id)
    .bind(&enrolled.course_id)
    .bind(Json(&enrolled.videos_watched))
    .bind(&enrolled.created_at)
    .bind(&enrolled.updated_at)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_by_key(
    db: &SqlitePool,
    student_id: &str,
    course_id: &str,
    req: UpdateEnrollmentRequest,
) -> Result<Option<EnrolledCourse>, sqlx::Error> {
    let mut current = match find_by_key(db, student_id, course_id).await? {
        Some(e) => e,
        None => return Ok(None),
    };

    if let Some(videos_watched) = req.videos_watched {
        current.videos_watched = videos_watched;
    }
    current.updated_at = now();

    let updated = sqlx::query("UPDATE enrolled_courses SET videos_watched = ?, updated_at = ? WHERE id = ?")
        .bind(Json(&current.videos_watched))
        .bind(&current.updated_at)
        .bind(&current.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((updated > 0).then_some(current))
}

pub async fn delete_by_key(
    db: &SqlitePool,
    student_id: &str,
    course_id: &str,
) -> Result<Option<EnrolledCourse>, sqlx::Error> {
    let Some(enrolled) = find_by_key(db, student_id, course_id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM enrolled_courses WHERE id = ?")
        .bind(&enrolled.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(enrolled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::new_id;

    async fn setup_test_db() -> SqlitePool {
        crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db")
    }

    fn record(student_id: &str, course_id: &str, videos: usize) -> EnrolledCourse {
        let now = now();
        EnrolledCourse {
            id: new_id(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            videos_watched: vec![false; videos],
            created_at: now.clone(),
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_compound_key_lookup() {
        let pool = setup_test_db().await;

        insert(&pool, &record("s1", "c1", 3)).await.unwrap();
        insert(&pool, &record("s1", "c2", 4)).await.unwrap();
        insert(&pool, &record("s2", "c1", 3)).await.unwrap();

        let found = find_by_key(&pool, "s1", "c2").await.unwrap().expect("Enrollment not found");
        assert_eq!(found.videos_watched.len(), 4);

        assert!(find_by_key(&pool, "s2", "c2").await.unwrap().is_none());
        assert_eq!(fetch_by_student(&pool, "s1").await.unwrap().len(), 2);
        assert_eq!(fetch_by_course(&pool, "c1").await.unwrap().len(), 2);

        let first = find_by_student(&pool, "s1").await.unwrap().unwrap();
        assert_eq!(first.course_id, "c1");
    }

    #[tokio::test]
    async fn test_update_by_key_marks_videos() {
        let pool = setup_test_db().await;
        insert(&pool, &record("s1", "c1", 3)).await.unwrap();

        let patch = UpdateEnrollmentRequest {
            videos_watched: Some(vec![true, false, true]),
        };
        let updated = update_by_key(&pool, "s1", "c1", patch).await.unwrap().unwrap();
        assert_eq!(updated.videos_watched, vec![true, false, true]);

        let stored = find_by_key(&pool, "s1", "c1").await.unwrap().unwrap();
        assert_eq!(stored.videos_watched, vec![true, false, true]);
    }

    #[tokio::test]
    async fn test_delete_by_key_removes_one_duplicate() {
        let pool = setup_test_db().await;
        insert(&pool, &record("s1", "c1", 2)).await.unwrap();
        insert(&pool, &record("s1", "c1", 2)).await.unwrap();

        assert!(delete_by_key(&pool, "s1", "c1").await.unwrap().is_some());
        assert_eq!(fetch_by_student(&pool, "s1").await.unwrap().len(), 1);
        assert!(delete_by_key(&pool, "s1", "c1").await.unwrap().is_some());
        assert!(delete_by_key(&pool, "s1", "c1").await.unwrap().is_none());
    }
}
