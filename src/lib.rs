pub mod catalog;
pub mod comments;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod flash;
pub mod movies;
pub mod posters;
pub mod ratings;
pub mod routes;
pub mod seed;
pub mod templates;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::posters::PosterStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
    pub posters: PosterStore,
}

pub fn router(state: Arc<AppState>) -> Router {
    let images_dir = state.config.static_dir.join("images");

    Router::new()
        .route("/", get(routes::index))
        .route("/movies", post(routes::create))
        .route("/movies/new", get(routes::create_form))
        .route("/movies/{id}", get(routes::details))
        .route("/movies/{id}/edit", get(routes::edit_form).post(routes::edit))
        .route("/movies/{id}/delete", get(routes::delete_form).post(routes::delete))
        .route("/movies/{id}/comments", post(routes::add_comment))
        .route("/movies/{id}/rate", post(routes::rate))
        .route("/comments/{id}/delete", post(routes::delete_comment))
        .nest_service("/images", ServeDir::new(images_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
