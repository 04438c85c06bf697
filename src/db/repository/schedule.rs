use sqlx::SqlitePool;

use super::{new_id, now};
use crate::models::{NewScheduleRequest, Schedule, UpdateScheduleRequest};

const COLUMNS: &str =
    "id, course_id, title, description, start_time, end_time, created_at, updated_at";

pub async fn fetch_for_course(db: &SqlitePool, course_id: &str) -> Result<Vec<Schedule>, sqlx::Error> {
    sqlx::query_as::<_, Schedule>(&format!(
        "SELECT {} FROM schedules WHERE course_id = ? ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Schedule>, sqlx::Error> {
    sqlx::query_as::<_, Schedule>(&format!("SELECT {} FROM schedules WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(
    db: &SqlitePool,
    course_id: &str,
    req: NewScheduleRequest,
) -> Result<Schedule, sqlx::Error> {
    let now = now();
    let schedule = Schedule {
        id: new_id(),
        course_id: course_id.to_string(),
        title: req.title,
        description: req.description,
        start_time: req.start_time,
        end_time: req.end_time,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO schedules ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&schedule.id)
    .bind(&schedule.course_id)
    .bind(&schedule.title)
    .bind(&schedule.description)
    .bind(&schedule.start_time)
    .bind(&schedule.end_time)
    .bind(&schedule.created_at)
    .bind(&schedule.updated_at)
    .execute(db)
    .await?;

    Ok(schedule)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateScheduleRequest,
) -> Result<Option<Schedule>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(s) => s,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if req.description.is_some() {
        current.description = req.description;
    }
    if let Some(start_time) = req.start_time {
        current.start_time = start_time;
    }
    if req.end_time.is_some() {
        current.end_time = req.end_time;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `schedule`. `false` when the row is gone.
async fn save(db: &SqlitePool, schedule: &Schedule) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query(
        r#"
        UPDATE schedules
        SET title = ?, description = ?, start_time = ?, end_time = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&schedule.title)
    .bind(&schedule.description)
    .bind(&schedule.start_time)
    .bind(&schedule.end_time)
    .bind(&schedule.updated_at)
    .bind(&schedule.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<Schedule>, sqlx::Error> {
    let Some(schedule) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM schedules WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(schedule))
}
