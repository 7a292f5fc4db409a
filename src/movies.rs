use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder, Set,
};

use crate::entities::{comment, movie};
use crate::error::{AppError, AppResult, FieldError};
use crate::posters::{self, PosterStore, Upload};

pub const MIN_YEAR: i32 = 1888;
pub const MAX_YEAR: i32 = 2025;

/// Form fields a user can type into on create and edit.
#[derive(Clone, Debug, Default)]
pub struct MovieInput {
    pub title: String,
    pub director: String,
    pub genre: String,
    /// None when the field was missing or not a number.
    pub year: Option<i32>,
    pub description: String,
    pub rating: f64,
}

/// Edit submissions carry the identity and the vote state through hidden
/// fields, the same way the prefilled form received them.
#[derive(Clone, Debug)]
pub struct EditInput {
    pub id: i32,
    pub fields: MovieInput,
    pub poster_url: String,
    pub rating_count: i32,
}

/// Checks every declared constraint and reports all violations at once.
pub fn validate(input: &MovieInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if input.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if input.title.len() > 200 {
        errors.push(FieldError::new("title", "Title must be at most 200 characters"));
    }

    if input.director.trim().is_empty() {
        errors.push(FieldError::new("director", "Director is required"));
    } else if input.director.len() > 100 {
        errors.push(FieldError::new("director", "Director must be at most 100 characters"));
    }

    if input.genre.trim().is_empty() {
        errors.push(FieldError::new("genre", "Genre is required"));
    } else if input.genre.len() > 50 {
        errors.push(FieldError::new("genre", "Genre must be at most 50 characters"));
    }

    match input.year {
        Some(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => {}
        Some(_) | None => errors.push(FieldError::new(
            "year",
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"),
        )),
    }

    if input.description.trim().is_empty() {
        errors.push(FieldError::new("description", "Description is required"));
    } else if input.description.len() > 1000 {
        errors.push(FieldError::new("description", "Description must be at most 1000 characters"));
    }

    if !(0.0..=10.0).contains(&input.rating) {
        errors.push(FieldError::new("rating", "Rating must be between 0 and 10"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub async fn find(db: &DatabaseConnection, id: i32) -> AppResult<movie::Model> {
    movie::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)
}

/// The movie plus its comments in insertion order, for the detail page.
pub async fn find_with_comments(
    db: &DatabaseConnection,
    id: i32,
) -> AppResult<(movie::Model, Vec<comment::Model>)> {
    let movie = find(db, id).await?;
    let comments = movie
        .find_related(comment::Entity)
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?;
    Ok((movie, comments))
}

pub async fn create(
    db: &DatabaseConnection,
    posters: &PosterStore,
    input: &MovieInput,
    poster: Option<Upload>,
) -> AppResult<movie::Model> {
    validate(input).map_err(AppError::Validation)?;

    let poster_url = match &poster {
        Some(upload) => posters.save(upload).await?,
        None => posters::DEFAULT_POSTER.to_string(),
    };

    let model = movie::ActiveModel {
        title: Set(input.title.clone()),
        director: Set(input.director.clone()),
        genre: Set(input.genre.clone()),
        year: Set(input.year.unwrap_or_default()),
        poster_url: Set(poster_url.clone()),
        description: Set(input.description.clone()),
        rating: Set(input.rating),
        rating_count: Set(0),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(movie) => Ok(movie),
        Err(err) => {
            // The row never landed, so take the freshly written file with it.
            if poster.is_some() {
                let _ = posters.delete(&poster_url).await;
            }
            Err(err.into())
        }
    }
}

pub async fn update(
    db: &DatabaseConnection,
    posters: &PosterStore,
    path_id: i32,
    edit: &EditInput,
    poster: Option<Upload>,
) -> AppResult<movie::Model> {
    if path_id != edit.id {
        return Err(AppError::NotFound);
    }

    validate(&edit.fields).map_err(AppError::Validation)?;

    let poster_url = match &poster {
        Some(upload) => {
            posters.delete(&edit.poster_url).await?;
            posters.save(upload).await?
        }
        None => edit.poster_url.clone(),
    };

    let model = movie::ActiveModel {
        id: Set(edit.id),
        title: Set(edit.fields.title.clone()),
        director: Set(edit.fields.director.clone()),
        genre: Set(edit.fields.genre.clone()),
        year: Set(edit.fields.year.unwrap_or_default()),
        poster_url: Set(poster_url),
        description: Set(edit.fields.description.clone()),
        rating: Set(edit.fields.rating),
        rating_count: Set(edit.rating_count),
    };

    match movie::Entity::update(model).exec(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => {
            // Vanished between the form render and the submit, or a genuine
            // write conflict. Only the former maps to a 404.
            if movie::Entity::find_by_id(edit.id).one(db).await?.is_none() {
                Err(AppError::NotFound)
            } else {
                Err(AppError::Database(DbErr::RecordNotUpdated))
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// Idempotent: an id with no row behind it is a no-op.
pub async fn delete(db: &DatabaseConnection, posters: &PosterStore, id: i32) -> AppResult<()> {
    let Some(existing) = movie::Entity::find_by_id(id).one(db).await? else {
        return Ok(());
    };

    posters.delete(&existing.poster_url).await?;
    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> MovieInput {
        MovieInput {
            title: "Heat".into(),
            director: "Michael Mann".into(),
            genre: "Crime, Thriller".into(),
            year: Some(1995),
            description: "A heist crew and an obsessive detective circle each other.".into(),
            rating: 0.0,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate(&valid_input()).is_ok());
    }

    #[test]
    fn all_violations_reported_at_once() {
        let errors = validate(&MovieInput::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "director", "genre", "year", "description"]);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let mut input = valid_input();
        input.year = Some(MIN_YEAR);
        assert!(validate(&input).is_ok());
        input.year = Some(MAX_YEAR);
        assert!(validate(&input).is_ok());
        input.year = Some(MIN_YEAR - 1);
        assert!(validate(&input).is_err());
        input.year = Some(MAX_YEAR + 1);
        assert!(validate(&input).is_err());
    }

    #[test]
    fn overlong_fields_rejected() {
        let mut input = valid_input();
        input.title = "x".repeat(201);
        input.rating = 10.5;
        let errors = validate(&input).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "rating"]);
    }
}
