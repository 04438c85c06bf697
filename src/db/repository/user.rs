use sqlx::SqlitePool;
use sqlx::types::Json;

use super::{new_id, now};
use crate::models::{NewUserRequest, UpdateUserRequest, User};

const COLUMNS: &str = "id, first_name, last_name, email, phone, address, description, score, \
    is_admin, wishlist, created_at, updated_at";

pub async fn fetch_all(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, req: NewUserRequest) -> Result<User, sqlx::Error> {
    let now = now();
    let user = User {
        id: new_id(),
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        address: req.address,
        description: req.description,
        score: req.score.unwrap_or(0),
        is_admin: req.is_admin,
        wishlist: req.wishlist,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(&format!(
        "INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        COLUMNS
    ))
    .bind(&user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.address)
    .bind(&user.description)
    .bind(user.score)
    .bind(user.is_admin)
    .bind(Json(&user.wishlist))
    .bind(&user.created_at)
    .bind(&user.updated_at)
    .execute(db)
    .await?;

    Ok(user)
}

pub async fn update(
    db: &SqlitePool,
    id: &str,
    req: UpdateUserRequest,
) -> Result<Option<User>, sqlx::Error> {
    let mut current = match find_by_id(db, id).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if let Some(first_name) = req.first_name {
        current.first_name = first_name;
    }
    if let Some(last_name) = req.last_name {
        current.last_name = last_name;
    }
    if let Some(email) = req.email {
        current.email = email;
    }
    if let Some(phone) = req.phone {
        current.phone = phone;
    }
    if let Some(address) = req.address {
        current.address = address;
    }
    if let Some(description) = req.description {
        current.description = description;
    }
    if let Some(score) = req.score {
        current.score = score;
    }
    if let Some(is_admin) = req.is_admin {
        current.is_admin = is_admin;
    }
    current.updated_at = now();

    Ok(save(db, &current).await?.then_some(current))
}

/// Writes every mutable field of `user`. `false` when the row is gone.
async fn save(db: &SqlitePool, user: &User) -> Result<bool, sqlx::Error> {
    let updated = sqlx::query(
        r#"
        UPDATE users
        SET first_name = ?, last_name = ?, email = ?, phone = ?, address = ?,
            description = ?, score = ?, is_admin = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.phone)
    .bind(&user.address)
    .bind(&user.description)
    .bind(user.score)
    .bind(user.is_admin)
    .bind(&user.updated_at)
    .bind(&user.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

/// Overwrites the stored wishlist with `user.wishlist`. Returns false when the
/// user no longer exists.
pub async fn save_wishlist(db: &SqlitePool, user: &User) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET wishlist = ?, updated_at = ? WHERE id = ?")
        .bind(Json(&user.wishlist))
        .bind(&user.updated_at)
        .bind(&user.id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Enrollments of the user are left in place.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    let Some(user) = find_by_id(db, id).await? else {
        return Ok(None);
    };

    let removed = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok((removed > 0).then_some(user))
}
