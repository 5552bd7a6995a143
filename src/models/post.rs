//! Post domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Blog post, owned by exactly one creator
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,

    /// Owning user, immutable after creation
    pub creator_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(custom(function = validate_title))]
    pub title: String,

    #[validate(custom(function = validate_content))]
    pub content: String,
}

/// Update post request (full overwrite of title and content)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(custom(function = validate_title))]
    pub title: String,

    #[validate(custom(function = validate_content))]
    pub content: String,
}

// Lengths are measured after trimming, so padding cannot smuggle a
// short title or content past the 5-character floor.

fn validate_title(title: &str) -> Result<(), ValidationError> {
    min_trimmed_length(title, "Title must be at least 5 characters long.")
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    min_trimmed_length(content, "Content must be at least 5 characters long.")
}

fn min_trimmed_length(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 5 {
        let mut err = ValidationError::new("length");
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}
