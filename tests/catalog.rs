mod common;

use std::collections::HashSet;

use cinelog::catalog::{self, CatalogQuery, PAGE_SIZE, SortOrder};
use cinelog::seed;

async fn seeded_db() -> sea_orm::DatabaseConnection {
    let db = common::test_db().await;
    seed::seed_movies(&db).await.expect("seed");
    db
}

fn query() -> CatalogQuery {
    CatalogQuery { page: 1, ..Default::default() }
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let db = seeded_db().await;
    seed::seed_movies(&db).await.expect("second seed");

    let page = catalog::fetch_page(&db, &query()).await.unwrap();
    assert_eq!(page.total_pages, 2); // still ten movies, six per page
}

#[tokio::test]
async fn pages_concatenate_to_the_full_sorted_set() {
    let db = seeded_db().await;

    let mut collected = Vec::new();
    let first = catalog::fetch_page(&db, &query()).await.unwrap();
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.movies.len(), PAGE_SIZE as usize);
    collected.extend(first.movies);

    let second =
        catalog::fetch_page(&db, &CatalogQuery { page: 2, ..Default::default() }).await.unwrap();
    assert_eq!(second.movies.len(), 4);
    collected.extend(second.movies);

    // No duplicates, no omissions, and already in title order.
    let ids: HashSet<i32> = collected.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 10);
    let titles: Vec<&str> = collected.iter().map(|m| m.title.as_str()).collect();
    let mut sorted = titles.clone();
    sorted.sort_unstable();
    assert_eq!(titles, sorted);
}

#[tokio::test]
async fn page_beyond_the_end_is_empty_not_clamped() {
    let db = seeded_db().await;
    let page =
        catalog::fetch_page(&db, &CatalogQuery { page: 5, ..Default::default() }).await.unwrap();
    assert!(page.movies.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn search_matches_title_or_director_case_insensitively() {
    let db = seeded_db().await;

    let by_director = catalog::fetch_page(
        &db,
        &CatalogQuery { search: Some("nolan".into()), ..query() },
    )
    .await
    .unwrap();
    let titles: HashSet<&str> = by_director.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["Interstellar", "The Dark Knight", "Inception"]));

    let by_title = catalog::fetch_page(
        &db,
        &CatalogQuery { search: Some("matrix".into()), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(by_title.movies.len(), 1);
    assert_eq!(by_title.movies[0].title, "The Matrix");
}

#[tokio::test]
async fn genre_filter_matches_one_tag_in_a_comma_joined_string() {
    let db = seeded_db().await;

    let dramas = catalog::fetch_page(
        &db,
        &CatalogQuery { genre: Some("Drama".into()), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(dramas.total_pages, 1);
    assert_eq!(dramas.movies.len(), 6);
    assert!(dramas.movies.iter().all(|m| m.genre.contains("Drama")));
}

#[tokio::test]
async fn filters_compose_with_and() {
    let db = seeded_db().await;

    let page = catalog::fetch_page(
        &db,
        &CatalogQuery { genre: Some("Drama".into()), year: Some(1999), ..query() },
    )
    .await
    .unwrap();

    let titles: HashSet<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["The Green Mile", "Fight Club"]));
}

#[tokio::test]
async fn year_filter_is_exact() {
    let db = seeded_db().await;
    let page =
        catalog::fetch_page(&db, &CatalogQuery { year: Some(1994), ..query() }).await.unwrap();
    let titles: HashSet<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["Forrest Gump", "The Shawshank Redemption"]));
}

#[tokio::test]
async fn sort_tokens_order_as_documented() {
    let db = seeded_db().await;

    let rating_desc = catalog::fetch_page(
        &db,
        &CatalogQuery { sort: SortOrder::from_token(Some("rating_desc")), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(rating_desc.movies[0].title, "The Shawshank Redemption");

    let year_asc = catalog::fetch_page(
        &db,
        &CatalogQuery { sort: SortOrder::from_token(Some("year")), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(year_asc.movies[0].title, "The Godfather");

    let year_desc = catalog::fetch_page(
        &db,
        &CatalogQuery { sort: SortOrder::from_token(Some("year_desc")), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(year_desc.movies[0].title, "Interstellar");

    let title_desc = catalog::fetch_page(
        &db,
        &CatalogQuery { sort: SortOrder::from_token(Some("title_desc")), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(title_desc.movies[0].title, "The Shawshank Redemption");
}

#[tokio::test]
async fn unknown_sort_token_falls_back_to_title() {
    let db = seeded_db().await;
    let page = catalog::fetch_page(
        &db,
        &CatalogQuery { sort: SortOrder::from_token(Some("director_desc")), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(page.movies[0].title, "Fight Club");
}

#[tokio::test]
async fn filter_options_cover_the_whole_table_regardless_of_filters() {
    let db = seeded_db().await;

    let filtered =
        catalog::fetch_page(&db, &CatalogQuery { year: Some(1999), ..query() }).await.unwrap();

    assert_eq!(filtered.years, vec![2014, 2010, 2008, 1999, 1994, 1993, 1972]);
    assert_eq!(filtered.genres.len(), 10);
    let mut sorted = filtered.genres.clone();
    sorted.sort_unstable();
    assert_eq!(filtered.genres, sorted);
}

#[tokio::test]
async fn blank_search_and_genre_are_no_filters() {
    let db = seeded_db().await;
    let page = catalog::fetch_page(
        &db,
        &CatalogQuery { search: Some("   ".into()), genre: Some(String::new()), ..query() },
    )
    .await
    .unwrap();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.movies.len(), 6);
}
