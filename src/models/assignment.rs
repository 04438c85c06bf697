use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    pub link: String,
    pub submit_by: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAssignmentRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
    #[validate(length(min = 1, message = "submit_by must not be empty"))]
    pub submit_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: Option<String>,
    #[validate(length(min = 1, message = "submit_by must not be empty"))]
    pub submit_by: Option<String>,
}
