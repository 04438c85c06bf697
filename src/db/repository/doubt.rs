use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{new_id, now};
use crate::models::{Doubt, DoubtAnswer, NewDoubtAnswerRequest, NewDoubtRequest, UpdateDoubtRequest};

const COLUMNS: &str =
    "id, asked_by, question, tags, is_resolved, request_mentor, answers, created_at, updated_at";

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<Doubt>, sqlx::Error> {
    sqlx::query_as::<_, Doubt>(&format!(
        "SELECT {} FROM doubts ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<Doubt>, sqlx::Error> {
    sqlx::query_as::<_, Doubt>(&format!("SELECT {} FROM doubts WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, req: NewDoubtRequest) -> Result<Doubt, sqlx::Error> {
    let now = now();
    let doubt = Doubt {
        id: new_id(),
        asked_by: req.asked_by,
        question: req.question,
        tags: req.tags,
        is_resolved: req.is_resolved,
        request_mentor: req.request_mentor,
        answers: Vec::new(),
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO doubts ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&doubt.id)
    .bind(&doubt.asked_by)
    .bind(&doubt.question)
    .bind(Json(&doubt.tags))
    .bind(doubt.is_resolved)
    .bind(doubt.request_mentor)
    .bind(Json(&doubt.answers))
    .bind(&doubt.created_at)
    .bind(&doubt.updated_at)
    .execute(db)
    .await?;

    Ok(doubt)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateDoubtRequest,
) -> Result<Option<Doubt>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(d) => d,
        None => return Ok(None),
    };

    if let Some(tags) = req.tags {
        current.tags = tags;
    }
    if let Some(question) = req.question {
        current.question = question;
    }
    if let Some(request_mentor) = req.request_mentor {
        current.request_mentor = request_mentor;
    }
    if let Some(is_resolved) = req.is_resolved {
        current.is_resolved = is_resolved;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Appends an answer to the doubt's thread.
pub async fn add_answer(
    db: &SqlitePool,
    id: &str,
    req: NewDoubtAnswerRequest,
) -> Result<Option<Doubt>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(d) => d,
        None => return Ok(None),
    };

    let now = now();
    current.answers.push(DoubtAnswer {
        answered_by: req.answered_by,
        answer: req.answer,
        created_at: now.clone(),
    });
    current.updated_at = now;

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `doubt`. `false` when the row is gone.
async fn save(db: &SqlitePool, doubt: &Doubt) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query(
        r#"
        UPDATE doubts
        SET question = ?, tags = ?, is_resolved = ?, request_mentor = ?, answers = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&doubt.question)
    .bind(Json(&doubt.tags))
    .bind(doubt.is_resolved)
    .bind(doubt.request_mentor)
    .bind(Json(&doubt.answers))
    .bind(&doubt.updated_at)
    .bind(&doubt.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<Doubt>, sqlx::Error> {
    let Some(doubt) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM doubts WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(doubt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoubtTag;

    async fn setup_test_db() -> SqlitePool {
        crate::db::connect_in_memory()
            .await
            .expect("Failed to create test db")
    }

    fn question() -> NewDoubtRequest {
        NewDoubtRequest {
            tags: vec![DoubtTag::Dsa, DoubtTag::SystemDesign],
            asked_by: "noobcoder".to_string(),
            question: "Why is my heap not a heap?".to_string(),
            request_mentor: true,
            is_resolved: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_doubt() {
        let pool = setup_test_db().await;

        let doubt = insert(&pool, question()).await.expect("Failed to insert doubt");
        let stored = find_by_id(&pool, &doubt.id).await.unwrap().expect("Doubt not found");

        assert_eq!(stored.tags, vec![DoubtTag::Dsa, DoubtTag::SystemDesign]);
        assert!(stored.request_mentor);
        assert!(stored.answers.is_empty());
    }

    #[tokio::test]
    async fn test_answer_then_resolve() {
        let pool = setup_test_db().await;
        let doubt = insert(&pool, question()).await.unwrap();

        let answer = NewDoubtAnswerRequest {
            answered_by: "mentor".to_string(),
            answer: "Check your sift-down".to_string(),
        };
        let answered = add_answer(&pool, &doubt.id, answer).await.unwrap().unwrap();
        assert_eq!(answered.answers.len(), 1);
        assert_eq!(answered.answers[0].answered_by, "mentor");

        let patch = UpdateDoubtRequest {
            is_resolved: Some(true),
            ..Default::default()
        };
        let resolved = update(&pool, &doubt.id, patch).await.unwrap().unwrap();
        assert!(resolved.is_resolved);
        assert_eq!(resolved.answers.len(), 1);
    }

    #[tokio::test]
    async fn test_answer_missing_doubt() {
        let pool = setup_test_db().await;
        let answer = NewDoubtAnswerRequest {
            answered_by: "mentor".to_string(),
            answer: "hello".to_string(),
        };
        assert!(add_answer(&pool, "missing", answer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_reports_missing_row() {
        let pool = setup_test_db().await;
        let mut doubt = insert(&pool, question()).await.unwrap();
        doubt.is_resolved = true;
        assert!(save(&pool, &doubt).await.unwrap());

        delete(&pool, &doubt.id).await.unwrap();
        assert!(!save(&pool, &doubt).await.unwrap());
        assert!(find_by_id(&pool, &doubt.id).await.unwrap().is_none());
    }
}
