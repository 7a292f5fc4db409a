#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Set,
    Statement,
};

use cinelog::entities::movie;
use cinelog::posters;

/// Fresh migrated in-memory database. One connection only: a pool would hand
/// each checkout its own empty database.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect to in-memory sqlite");
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys=ON".to_string(),
    ))
    .await
    .expect("enable foreign keys");

    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn insert_movie(
    db: &DatabaseConnection,
    title: &str,
    rating: f64,
    rating_count: i32,
) -> movie::Model {
    movie::ActiveModel {
        title: Set(title.to_string()),
        director: Set("Test Director".to_string()),
        genre: Set("Drama".to_string()),
        year: Set(2000),
        poster_url: Set(posters::DEFAULT_POSTER.to_string()),
        description: Set("A test movie.".to_string()),
        rating: Set(rating),
        rating_count: Set(rating_count),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert movie")
}
