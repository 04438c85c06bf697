use sqlx::SqlitePool;

use super::{new_id, now};
use crate::models::{Announcement, NewAnnouncementRequest, UpdateAnnouncementRequest};

const COLUMNS: &str = "id, title, content, created_at, updated_at";

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {} FROM announcements ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Announcement>, sqlx::Error> {
    sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {} FROM announcements WHERE id = ?",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    req: NewAnnouncementRequest,
) -> Result<Announcement, sqlx::Error> {
    let now = now();
    let announcement = Announcement {
        id: new_id(),
        title: req.title,
        content: req.content,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO announcements ({}) VALUES (?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&announcement.id)
    .bind(&announcement.title)
    .bind(&announcement.content)
    .bind(&announcement.created_at)
    .bind(&announcement.updated_at)
    .execute(db)
    .await?;

    Ok(announcement)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateAnnouncementRequest,
) -> Result<Option<Announcement>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(a) => a,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(content) = req.content {
        current.content = content;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `announcement`. `false` when the row is gone.
async fn save(db: &SqlitePool, announcement: &Announcement) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query("UPDATE announcements SET title = ?, content = ?, updated_at = ? WHERE id = ?")
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(&announcement.updated_at)
        .bind(&announcement.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(updated > 0)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<Announcement>, sqlx::Error> {
    let Some(announcement) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(announcement))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_after_delete() {
        let pool = crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db");
        let req = NewAnnouncementRequest {
            title: "Holiday".to_string(),
            content: "No class on Friday".to_string(),
        };
        let announcement = insert(&pool, req).await.unwrap();

        let patch = UpdateAnnouncementRequest {
            content: Some("No class on Monday".to_string()),
            ..Default::default()
        };
        let updated = update(&pool, &announcement.id, patch.clone()).await.unwrap().unwrap();
        assert_eq!(updated.title, "Holiday");

        delete(&pool, &announcement.id).await.unwrap();
        assert!(!save(&pool, &updated).await.unwrap());
        assert!(update(&pool, &announcement.id, patch).await.unwrap().is_none());
    }
}
