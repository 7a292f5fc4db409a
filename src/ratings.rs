use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::movie;
use crate::error::{AppError, AppResult, FieldError};

pub const MIN_VOTE: i32 = 1;
pub const MAX_VOTE: i32 = 10;

/// Running average after one more vote, at one decimal place. Rounding is
/// half away from zero (`f64::round`).
pub fn next_average(rating: f64, rating_count: i32, vote: i32) -> f64 {
    let total = rating * f64::from(rating_count) + f64::from(vote);
    (total / f64::from(rating_count + 1) * 10.0).round() / 10.0
}

/// Folds one vote into the movie's running average and vote count.
///
/// The two columns move together in a single conditional update: the
/// previously read vote count doubles as an optimistic version token, so a
/// concurrent vote makes the write miss and the loop re-read instead of
/// silently losing an increment.
pub async fn rate_movie(
    db: &DatabaseConnection,
    movie_id: i32,
    vote: i32,
) -> AppResult<movie::Model> {
    if !(MIN_VOTE..=MAX_VOTE).contains(&vote) {
        return Err(AppError::Validation(vec![FieldError::new(
            "rating",
            format!("Rating must be between {MIN_VOTE} and {MAX_VOTE}"),
        )]));
    }

    loop {
        let movie =
            movie::Entity::find_by_id(movie_id).one(db).await?.ok_or(AppError::NotFound)?;

        let new_rating = next_average(movie.rating, movie.rating_count, vote);
        let new_count = movie.rating_count + 1;

        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Rating, Expr::value(new_rating))
            .col_expr(movie::Column::RatingCount, Expr::value(new_count))
            .filter(movie::Column::Id.eq(movie_id))
            .filter(movie::Column::RatingCount.eq(movie.rating_count))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(movie::Model { rating: new_rating, rating_count: new_count, ..movie });
        }
    }
}
