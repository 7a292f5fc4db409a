use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::{comment, movie};
use crate::error::{AppError, AppResult, FieldError};

/// Appends a comment to a movie. Both fields are trimmed; blank input is a
/// validation failure, an unknown movie a 404.
pub async fn add(
    db: &DatabaseConnection,
    movie_id: i32,
    author_name: &str,
    text: &str,
) -> AppResult<comment::Model> {
    let author = author_name.trim();
    let body = text.trim();

    if author.is_empty() || body.is_empty() {
        return Err(AppError::Validation(vec![FieldError::new(
            "comment",
            "Fill in both comment fields",
        )]));
    }

    if movie::Entity::find_by_id(movie_id).one(db).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let model = comment::ActiveModel {
        movie_id: Set(movie_id),
        author_name: Set(author.to_string()),
        text: Set(body.to_string()),
        created_at: Set(jiff::Timestamp::now().as_second()),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Idempotent removal. Returns whether a comment actually went away, so the
/// caller can decide about the flash notice.
pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let result = comment::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
