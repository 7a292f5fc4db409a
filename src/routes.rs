use std::sync::Arc;

use axum::extract::{Form, Multipart, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use serde::Deserialize;

use crate::catalog::{self, CatalogQuery, SortOrder};
use crate::error::{AppError, AppResult, FieldError};
use crate::flash::{self, Flash};
use crate::movies::{self, EditInput, MovieInput};
use crate::posters::{self, Upload};
use crate::{AppState, comments, ratings, templates};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    search: Option<String>,
    genre: Option<String>,
    /// Kept as text so an empty dropdown submission stays deserializable.
    year: Option<String>,
    sort: Option<String>,
    page: Option<u64>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> AppResult<Markup> {
    let query = CatalogQuery {
        search: params.search.filter(|s| !s.trim().is_empty()),
        genre: params.genre.filter(|s| !s.is_empty()),
        year: params.year.as_deref().and_then(|y| y.trim().parse().ok()),
        sort: SortOrder::from_token(params.sort.as_deref()),
        page: params.page.unwrap_or(1),
    };

    let page = catalog::fetch_page(&state.db, &query).await?;
    Ok(templates::index_page(&query, &page))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Markup)> {
    let (movie, comments) = movies::find_with_comments(&state.db, id).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, templates::details_page(&movie, &comments, flash.as_ref())))
}

pub async fn create_form() -> Markup {
    templates::create_page(&MovieInput::default(), &[])
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_movie_form(multipart).await?;

    match movies::create(&state.db, &state.posters, &form.input, form.poster).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(templates::create_page(&form.input, &errors).into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Markup> {
    let movie = movies::find(&state.db, id).await?;
    let edit = EditInput {
        id: movie.id,
        fields: MovieInput {
            title: movie.title,
            director: movie.director,
            genre: movie.genre,
            year: Some(movie.year),
            description: movie.description,
            rating: movie.rating,
        },
        poster_url: movie.poster_url,
        rating_count: movie.rating_count,
    };
    Ok(templates::edit_page(&edit, &[]))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = read_movie_form(multipart).await?;
    let edit = EditInput {
        id: form.id.unwrap_or_default(),
        fields: form.input,
        poster_url: form.poster_url.unwrap_or_else(|| posters::DEFAULT_POSTER.to_string()),
        rating_count: form.rating_count.unwrap_or_default(),
    };

    match movies::update(&state.db, &state.posters, id, &edit, form.poster).await {
        Ok(movie) => Ok(Redirect::to(&format!("/movies/{}", movie.id)).into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(templates::edit_page(&edit, &errors).into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Markup> {
    let movie = movies::find(&state.db, id).await?;
    Ok(templates::delete_page(&movie))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    movies::delete(&state.db, &state.posters, id).await?;
    Ok(Redirect::to("/"))
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    author_name: String,
    text: String,
}

pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<CommentForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let back = Redirect::to(&format!("/movies/{id}"));
    match comments::add(&state.db, id, &form.author_name, &form.text).await {
        Ok(_) => Ok((flash::set(jar, Flash::success("Comment added.")), back)),
        Err(AppError::Validation(_)) => {
            Ok((flash::set(jar, Flash::error("Fill in both comment fields.")), back))
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentForm {
    movie_id: i32,
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<DeleteCommentForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let removed = comments::delete(&state.db, id).await?;
    let jar =
        if removed { flash::set(jar, Flash::success("Comment removed.")) } else { jar };
    Ok((jar, Redirect::to(&format!("/movies/{}", form.movie_id))))
}

#[derive(Debug, Deserialize)]
pub struct RateForm {
    rating: i32,
}

pub async fn rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<RateForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let back = Redirect::to(&format!("/movies/{id}"));
    match ratings::rate_movie(&state.db, id, form.rating).await {
        Ok(_) => Ok((flash::set(jar, Flash::success("Thanks for your vote!")), back)),
        Err(AppError::Validation(_)) => {
            Ok((flash::set(jar, Flash::error("Rating must be between 1 and 10.")), back))
        }
        Err(err) => Err(err),
    }
}

/// Everything a movie form can carry, for both create and edit.
#[derive(Debug, Default)]
struct MovieFormData {
    id: Option<i32>,
    input: MovieInput,
    poster_url: Option<String>,
    rating_count: Option<i32>,
    poster: Option<Upload>,
}

async fn read_movie_form(mut multipart: Multipart) -> AppResult<MovieFormData> {
    let mut form = MovieFormData::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        match field.name() {
            Some("title") => form.input.title = field.text().await.map_err(bad_upload)?,
            Some("director") => form.input.director = field.text().await.map_err(bad_upload)?,
            Some("genre") => form.input.genre = field.text().await.map_err(bad_upload)?,
            Some("year") => {
                form.input.year = field.text().await.map_err(bad_upload)?.trim().parse().ok();
            }
            Some("description") => {
                form.input.description = field.text().await.map_err(bad_upload)?;
            }
            Some("rating") => {
                form.input.rating =
                    field.text().await.map_err(bad_upload)?.trim().parse().unwrap_or_default();
            }
            Some("id") => form.id = field.text().await.map_err(bad_upload)?.trim().parse().ok(),
            Some("poster_url") => form.poster_url = Some(field.text().await.map_err(bad_upload)?),
            Some("rating_count") => {
                form.rating_count =
                    field.text().await.map_err(bad_upload)?.trim().parse().ok();
            }
            Some("poster") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(bad_upload)?;
                // Browsers submit an empty part when no file was picked.
                if !data.is_empty() {
                    form.poster = Some(Upload { file_name, data: data.to_vec() });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn bad_upload(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(vec![FieldError::new("form", format!("Malformed upload: {err}"))])
}
