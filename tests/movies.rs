mod common;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use cinelog::entities::{comment, movie};
use cinelog::error::AppError;
use cinelog::movies::{self, EditInput, MovieInput};
use cinelog::posters::{DEFAULT_POSTER, PosterStore, Upload};
use cinelog::{comments, seed};

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

fn poster_store(tmp: &tempfile::TempDir) -> PosterStore {
    PosterStore::new(tmp.path())
}

#[tokio::test]
async fn create_without_upload_uses_the_default_poster() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();

    let movie =
        movies::create(&db, &poster_store(&tmp), &valid_input(), None).await.unwrap();

    assert_eq!(movie.poster_url, DEFAULT_POSTER);
    assert_eq!(movie.rating_count, 0);
}

#[tokio::test]
async fn create_with_upload_stores_the_file_and_keeps_the_extension() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let upload = Upload { file_name: "heat-poster.jpg".into(), data: vec![0xFF, 0xD8, 0xFF] };
    let movie = movies::create(&db, &posters, &valid_input(), Some(upload)).await.unwrap();

    assert!(movie.poster_url.starts_with("/images/movies/"));
    assert!(movie.poster_url.ends_with(".jpg"));
    assert_ne!(movie.poster_url, DEFAULT_POSTER);

    let file = tmp
        .path()
        .join("images/movies")
        .join(movie.poster_url.rsplit('/').next().unwrap());
    assert!(file.exists());
}

#[tokio::test]
async fn create_with_missing_title_reports_it_and_persists_nothing() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();

    let mut input = valid_input();
    input.title = String::new();

    let before = movie::Entity::find().count(&db).await.unwrap();
    let err = movies::create(&db, &poster_store(&tmp), &input, None).await.unwrap_err();
    let after = movie::Entity::find().count(&db).await.unwrap();

    assert_eq!(before, after);
    match err {
        AppError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.field == "title"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn edit_updates_the_bound_fields() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let movie = movies::create(&db, &posters, &valid_input(), None).await.unwrap();

    let mut fields = valid_input();
    fields.title = "Heat (Director's Cut)".into();
    fields.rating = 8.3;
    let edit = EditInput {
        id: movie.id,
        fields,
        poster_url: movie.poster_url.clone(),
        rating_count: movie.rating_count,
    };

    let updated = movies::update(&db, &posters, movie.id, &edit, None).await.unwrap();
    assert_eq!(updated.title, "Heat (Director's Cut)");
    assert_eq!(updated.rating, 8.3);
    assert_eq!(updated.poster_url, DEFAULT_POSTER);
}

#[tokio::test]
async fn edit_with_mismatched_ids_is_not_found_regardless_of_existence() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let movie = movies::create(&db, &posters, &valid_input(), None).await.unwrap();
    let edit = EditInput {
        id: movie.id,
        fields: valid_input(),
        poster_url: movie.poster_url.clone(),
        rating_count: 0,
    };

    let err = movies::update(&db, &posters, movie.id + 1, &edit, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn edit_of_a_vanished_movie_is_not_found() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let edit = EditInput {
        id: 999,
        fields: valid_input(),
        poster_url: DEFAULT_POSTER.to_string(),
        rating_count: 0,
    };

    let err = movies::update(&db, &posters, 999, &edit, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn edit_with_new_poster_replaces_the_old_file() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let first = Upload { file_name: "old.png".into(), data: vec![1] };
    let movie = movies::create(&db, &posters, &valid_input(), Some(first)).await.unwrap();
    let old_file = tmp
        .path()
        .join("images/movies")
        .join(movie.poster_url.rsplit('/').next().unwrap());
    assert!(old_file.exists());

    let edit = EditInput {
        id: movie.id,
        fields: valid_input(),
        poster_url: movie.poster_url.clone(),
        rating_count: movie.rating_count,
    };
    let second = Upload { file_name: "new.png".into(), data: vec![2] };
    let updated = movies::update(&db, &posters, movie.id, &edit, Some(second)).await.unwrap();

    assert_ne!(updated.poster_url, movie.poster_url);
    assert!(updated.poster_url.ends_with(".png"));
    assert!(!old_file.exists());
}

#[tokio::test]
async fn delete_cascades_comments_and_removes_the_poster_file() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    let posters = poster_store(&tmp);

    let upload = Upload { file_name: "doomed.jpg".into(), data: vec![3] };
    let movie = movies::create(&db, &posters, &valid_input(), Some(upload)).await.unwrap();
    let file = tmp
        .path()
        .join("images/movies")
        .join(movie.poster_url.rsplit('/').next().unwrap());

    comments::add(&db, movie.id, "Ada", "Great pacing.").await.unwrap();
    comments::add(&db, movie.id, "Grace", "Saw it twice.").await.unwrap();

    movies::delete(&db, &posters, movie.id).await.unwrap();

    assert!(movie::Entity::find_by_id(movie.id).one(&db).await.unwrap().is_none());
    let orphans = comment::Entity::find()
        .filter(comment::Column::MovieId.eq(movie.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    assert!(!file.exists());
}

#[tokio::test]
async fn delete_of_an_unknown_id_is_a_no_op() {
    let db = common::test_db().await;
    let tmp = tempfile::tempdir().unwrap();
    seed::seed_movies(&db).await.unwrap();

    movies::delete(&db, &poster_store(&tmp), 999).await.unwrap();

    let count = movie::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 10);
}

#[tokio::test]
async fn find_with_comments_returns_them_in_insertion_order() {
    let db = common::test_db().await;
    let movie = common::insert_movie(&db, "Ordered", 0.0, 0).await;

    comments::add(&db, movie.id, "First", "one").await.unwrap();
    comments::add(&db, movie.id, "Second", "two").await.unwrap();

    let (_, listed) = movies::find_with_comments(&db, movie.id).await.unwrap();
    let authors: Vec<&str> = listed.iter().map(|c| c.author_name.as_str()).collect();
    assert_eq!(authors, ["First", "Second"]);
}

#[tokio::test]
async fn find_with_comments_on_unknown_id_is_not_found() {
    let db = common::test_db().await;
    let err = movies::find_with_comments(&db, 42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
