use sqlx::SqlitePool;

use super::{new_id, now};
use crate::models::{Assignment, NewAssignmentRequest, UpdateAssignmentRequest};

const COLUMNS: &str = "id, name, link, submit_by, created_at, updated_at";

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {} FROM assignments ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(&format!("SELECT {} FROM assignments WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, req: NewAssignmentRequest) -> Result<Assignment, sqlx::Error> {
    let now = now();
    let assignment = Assignment {
        id: new_id(),
        name: req.name,
        link: req.link,
        submit_by: req.submit_by,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO assignments ({}) VALUES (?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&assignment.id)
    .bind(&assignment.name)
    .bind(&assignment.link)
    .bind(&assignment.submit_by)
    .bind(&assignment.created_at)
    .bind(&assignment.updated_at)
    .execute(db)
    .await?;

    Ok(assignment)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateAssignmentRequest,
) -> Result<Option<Assignment>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(a) => a,
        None => return Ok(None),
    };

    if let Some(name) = req.name {
        current.name = name;
    }
    if let Some(link) = req.link {
        current.link = link;
    }
    if let Some(submit_by) = req.submit_by {
        current.submit_by = submit_by;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `assignment`. `false` when the row is gone.
async fn save(db: &SqlitePool, assignment: &Assignment) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query("UPDATE assignments SET name = ?, link = ?, submit_by = ?, updated_at = ? WHERE id = ?")
        .bind(&assignment.name)
        .bind(&assignment.link)
        .bind(&assignment.submit_by)
        .bind(&assignment.updated_at)
        .bind(&assignment.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(updated > 0)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<Assignment>, sqlx::Error> {
    let Some(assignment) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(assignment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assignment_lifecycle() {
        let pool = crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db");

        let req = NewAssignmentRequest {
            name: "Sorting".to_string(),
            link: "https://example.com/sorting.pdf".to_string(),
            submit_by: "2026-11-30".to_string(),
        };
        let created = insert(&pool, req).await.expect("Failed to insert assignment");

        let patch = UpdateAssignmentRequest {
            submit_by: Some("2026-12-07".to_string()),
            ..Default::default()
        };
        let updated = update(&pool, &created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "Sorting");
        assert_eq!(updated.submit_by, "2026-12-07");

        assert!(delete(&pool, &created.id).await.unwrap().is_some());
        assert!(fetch_all(&pool).await.unwrap().is_empty());
        assert!(update(&pool, &created.id, UpdateAssignmentRequest::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_save_reports_missing_row() {
        let pool = crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db");
        let req = NewAssignmentRequest {
            name: "Graphs".to_string(),
            link: "https://example.com/graphs.pdf".to_string(),
            submit_by: "2026-12-14".to_string(),
        };
        let assignment = insert(&pool, req).await.unwrap();

        delete(&pool, &assignment.id).await.unwrap();
        assert!(!save(&pool, &assignment).await.unwrap());
    }
}
