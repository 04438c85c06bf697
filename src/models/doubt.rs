use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoubtTag {
    Dsa,
    WebDev,
    Android,
    MachineLearning,
    SystemDesign,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubtAnswer {
    pub answered_by: String,
    pub answer: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doubt {
    pub id: String,
    pub asked_by: String,
    pub question: String,
    #[sqlx(json)]
    pub tags: Vec<DoubtTag>,
    pub is_resolved: bool,
    pub request_mentor: bool,
    #[sqlx(json)]
    pub answers: Vec<DoubtAnswer>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDoubtRequest {
    #[validate(length(min = 1, message = "tags must contain at least one tag"))]
    pub tags: Vec<DoubtTag>,
    #[validate(length(min = 1, message = "asked_by must not be empty"))]
    pub asked_by: String,
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,
    #[serde(default)]
    pub request_mentor: bool,
    #[serde(default)]
    pub is_resolved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDoubtRequest {
    #[validate(length(min = 1, message = "tags must contain at least one tag"))]
    pub tags: Option<Vec<DoubtTag>>,
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: Option<String>,
    pub request_mentor: Option<bool>,
    pub is_resolved: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDoubtAnswerRequest {
    #[validate(length(min = 1, message = "answered_by must not be empty"))]
    pub answered_by: String,
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: String,
}
