use maud::{DOCTYPE, Markup, html};

use crate::catalog::{CatalogPage, CatalogQuery, SortOrder};
use crate::entities::{comment, movie};
use crate::error::FieldError;
use crate::flash::Flash;
use crate::movies::{EditInput, MAX_YEAR, MIN_YEAR, MovieInput};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(query: &CatalogQuery, page: &CatalogPage) -> Markup {
    layout(
        "Movie Catalog",
        html! {
            div class="max-w-6xl mx-auto px-6 py-10" {
                div class="flex items-center justify-between" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movie Catalog" }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/movies/new" { "Add movie" }
                }

                (filter_bar(query, page))
                (sort_bar(query))

                @if page.movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies match these filters." }
                    }
                } @else {
                    div class="mt-8 grid gap-6 md:grid-cols-2 lg:grid-cols-3" {
                        @for movie in &page.movies {
                            (movie_card(movie))
                        }
                    }
                }

                (pagination(query, page))
            }
        },
    )
}

pub fn details_page(
    movie: &movie::Model,
    comments: &[comment::Model],
    flash: Option<&Flash>,
) -> Markup {
    layout(
        &movie.title,
        html! {
            div class="max-w-4xl mx-auto px-6 py-10" {
                @if let Some(flash) = flash {
                    (flash_banner(flash))
                }

                a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "← Back to catalog" }

                div class="mt-4 bg-white shadow rounded-lg p-8 md:flex md:gap-8" {
                    img class="w-48 rounded-md object-cover self-start" src=(movie.poster_url) alt=(movie.title);
                    div class="mt-6 md:mt-0" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) " " span class="font-normal text-gray-500" { "(" (movie.year) ")" } }
                        p class="mt-2 text-gray-600" { "Directed by " (movie.director) }
                        p class="mt-1 text-sm text-gray-500" { (movie.genre) }
                        p class="mt-4 text-gray-700" { (movie.description) }
                        p class="mt-4 text-lg font-semibold text-gray-900" {
                            "★ " (format!("{:.1}", movie.rating))
                            span class="ml-1 text-sm font-normal text-gray-500" { "(" (movie.rating_count) " votes)" }
                        }

                        form class="mt-4 flex items-center gap-2" method="post" action=(format!("/movies/{}/rate", movie.id)) {
                            label class="text-sm text-gray-700" for="rating" { "Your rating" }
                            select class="rounded-md border border-gray-300 px-2 py-1" name="rating" id="rating" {
                                @for value in 1..=10 {
                                    option value=(value) { (value) }
                                }
                            }
                            button class="rounded-md bg-blue-600 px-3 py-1 text-white hover:bg-blue-700" type="submit" { "Rate" }
                        }

                        div class="mt-6 flex gap-3" {
                            a class="rounded-md border border-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-100" href=(format!("/movies/{}/edit", movie.id)) { "Edit" }
                            a class="rounded-md border border-red-300 px-4 py-2 text-red-700 hover:bg-red-50" href=(format!("/movies/{}/delete", movie.id)) { "Delete" }
                        }
                    }
                }

                (comment_section(movie.id, comments))
            }
        },
    )
}

pub fn create_page(input: &MovieInput, errors: &[FieldError]) -> Markup {
    layout(
        "Add movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                h1 class="text-3xl font-bold text-gray-900" { "Add movie" }
                form class="mt-8 bg-white shadow rounded-lg p-8 space-y-5" method="post" action="/movies" enctype="multipart/form-data" {
                    (error_box(errors))
                    (movie_fields(input))
                    (form_actions("/", "Create"))
                }
            }
        },
    )
}

pub fn edit_page(edit: &EditInput, errors: &[FieldError]) -> Markup {
    layout(
        "Edit movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                h1 class="text-3xl font-bold text-gray-900" { "Edit movie" }
                form class="mt-8 bg-white shadow rounded-lg p-8 space-y-5" method="post" action=(format!("/movies/{}/edit", edit.id)) enctype="multipart/form-data" {
                    (error_box(errors))
                    input type="hidden" name="id" value=(edit.id);
                    input type="hidden" name="poster_url" value=(edit.poster_url);
                    input type="hidden" name="rating_count" value=(edit.rating_count);
                    (movie_fields(&edit.fields))
                    (form_actions(&format!("/movies/{}", edit.id), "Save"))
                }
            }
        },
    )
}

pub fn delete_page(movie: &movie::Model) -> Markup {
    layout(
        "Delete movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Delete this movie?" }
                    p class="mt-4 text-gray-700" {
                        (movie.title) " (" (movie.year) "), directed by " (movie.director) "."
                    }
                    p class="mt-2 text-sm text-gray-500" { "Its comments and poster will be removed as well." }
                    form class="mt-6 flex gap-3" method="post" action=(format!("/movies/{}/delete", movie.id)) {
                        button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                        a class="rounded-md border border-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-100" href=(format!("/movies/{}", movie.id)) { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> Markup {
    layout(
        "Not found",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "404" }
                        p class="mt-4 text-gray-700" { "That page does not exist." }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to catalog" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> Markup {
    layout(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="bg-gray-50" { (body) }
        }
    }
}

fn filter_bar(query: &CatalogQuery, page: &CatalogPage) -> Markup {
    html! {
        form class="mt-6 bg-white shadow rounded-lg p-4 flex flex-wrap items-end gap-4" method="get" action="/" {
            input type="hidden" name="sort" value=(query.sort.token());
            div {
                label class="block text-xs font-medium text-gray-500" for="search" { "Search" }
                input class="mt-1 rounded-md border border-gray-300 px-3 py-1.5" type="text" name="search" id="search"
                    placeholder="Title or director" value=[query.search.as_deref()];
            }
            div {
                label class="block text-xs font-medium text-gray-500" for="genre" { "Genre" }
                select class="mt-1 rounded-md border border-gray-300 px-2 py-1.5" name="genre" id="genre" {
                    option value="" { "All" }
                    @for genre in &page.genres {
                        option value=(genre) selected[query.genre.as_deref() == Some(genre)] { (genre) }
                    }
                }
            }
            div {
                label class="block text-xs font-medium text-gray-500" for="year" { "Year" }
                select class="mt-1 rounded-md border border-gray-300 px-2 py-1.5" name="year" id="year" {
                    option value="" { "All" }
                    @for year in &page.years {
                        option value=(year) selected[query.year == Some(*year)] { (year) }
                    }
                }
            }
            button class="rounded-md bg-gray-800 px-4 py-1.5 text-white hover:bg-gray-900" type="submit" { "Apply" }
            a class="text-sm text-gray-500 hover:text-gray-700" href="/" { "Reset" }
        }
    }
}

fn sort_bar(query: &CatalogQuery) -> Markup {
    // Each header link toggles between ascending and descending, the way the
    // catalog's sort tokens pair up.
    let title_target = if query.sort == SortOrder::TitleAsc { SortOrder::TitleDesc } else { SortOrder::TitleAsc };
    let year_target = if query.sort == SortOrder::YearAsc { SortOrder::YearDesc } else { SortOrder::YearAsc };
    let rating_target = if query.sort == SortOrder::RatingAsc { SortOrder::RatingDesc } else { SortOrder::RatingAsc };

    html! {
        div class="mt-4 flex gap-4 text-sm" {
            span class="text-gray-500" { "Sort by:" }
            a class="text-blue-600 hover:text-blue-800" href=(catalog_url(query, title_target, 1)) { "Title" }
            a class="text-blue-600 hover:text-blue-800" href=(catalog_url(query, year_target, 1)) { "Year" }
            a class="text-blue-600 hover:text-blue-800" href=(catalog_url(query, rating_target, 1)) { "Rating" }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        a class="bg-white shadow rounded-lg overflow-hidden hover:shadow-md" href=(format!("/movies/{}", movie.id)) {
            img class="h-56 w-full object-cover" src=(movie.poster_url) alt=(movie.title);
            div class="p-4" {
                h2 class="text-lg font-semibold text-gray-900" { (movie.title) }
                p class="text-sm text-gray-500" { (movie.director) " · " (movie.year) }
                p class="mt-1 text-sm text-gray-500" { (movie.genre) }
                p class="mt-2 font-medium text-gray-900" {
                    "★ " (format!("{:.1}", movie.rating))
                    span class="ml-1 text-xs font-normal text-gray-500" { "(" (movie.rating_count) ")" }
                }
            }
        }
    }
}

fn pagination(query: &CatalogQuery, page: &CatalogPage) -> Markup {
    html! {
        @if page.total_pages > 1 {
            div class="mt-10 flex justify-center gap-2" {
                @for number in 1..=page.total_pages {
                    @if number == page.page {
                        span class="rounded-md bg-blue-600 px-3 py-1.5 text-white" { (number) }
                    } @else {
                        a class="rounded-md border border-gray-300 px-3 py-1.5 text-gray-700 hover:bg-gray-100"
                            href=(catalog_url(query, query.sort, number)) { (number) }
                    }
                }
            }
        }
    }
}

fn comment_section(movie_id: i32, comments: &[comment::Model]) -> Markup {
    html! {
        div class="mt-8" {
            h2 class="text-xl font-semibold text-gray-900" { "Comments (" (comments.len()) ")" }

            @if comments.is_empty() {
                p class="mt-4 text-gray-500" { "No comments yet. Be the first!" }
            } @else {
                div class="mt-4 space-y-3" {
                    @for comment in comments {
                        div class="bg-white shadow rounded-lg p-4" {
                            div class="flex items-start justify-between" {
                                div {
                                    span class="font-semibold text-gray-900" { (comment.author_name) }
                                    span class="ml-2 text-xs text-gray-400" { (format_timestamp(comment.created_at)) }
                                }
                                form method="post" action=(format!("/comments/{}/delete", comment.id)) {
                                    input type="hidden" name="movie_id" value=(movie_id);
                                    button class="text-xs text-red-600 hover:text-red-800" type="submit" { "Delete" }
                                }
                            }
                            p class="mt-2 text-gray-700" { (comment.text) }
                        }
                    }
                }
            }

            form class="mt-6 bg-white shadow rounded-lg p-6 space-y-4" method="post" action=(format!("/movies/{movie_id}/comments")) {
                h3 class="font-semibold text-gray-900" { "Add a comment" }
                div {
                    label class="block text-sm text-gray-700" for="author_name" { "Name" }
                    input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="author_name" id="author_name" maxlength="100";
                }
                div {
                    label class="block text-sm text-gray-700" for="text" { "Comment" }
                    textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="text" id="text" rows="3" maxlength="500" {}
                }
                button class="rounded-md bg-blue-600 px-4 py-2 text-white hover:bg-blue-700" type="submit" { "Post" }
            }
        }
    }
}

fn movie_fields(input: &MovieInput) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for="title" { "Title" }
            input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="title" id="title" maxlength="200" value=(input.title);
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="director" { "Director" }
            input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="director" id="director" maxlength="100" value=(input.director);
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="genre" { "Genre" }
            input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="genre" id="genre" maxlength="50" placeholder="Drama, Crime" value=(input.genre);
            p class="mt-1 text-xs text-gray-500" { "Comma-separated tags." }
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="year" { "Year" }
            input class="mt-1 w-32 rounded-md border border-gray-300 px-3 py-2" type="number" name="year" id="year"
                min=(MIN_YEAR) max=(MAX_YEAR) value=[input.year];
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="description" { "Description" }
            textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="description" id="description" rows="4" maxlength="1000" { (input.description) }
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="rating" { "Rating" }
            input class="mt-1 w-32 rounded-md border border-gray-300 px-3 py-2" type="number" name="rating" id="rating"
                min="0" max="10" step="0.1" value=(input.rating);
        }
        div {
            label class="block text-sm font-medium text-gray-700" for="poster" { "Poster image" }
            input class="mt-1 w-full text-sm text-gray-500" type="file" name="poster" id="poster" accept="image/*";
        }
    }
}

fn form_actions(cancel_href: &str, submit_label: &str) -> Markup {
    html! {
        div class="flex gap-3 pt-2" {
            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { (submit_label) }
            a class="rounded-md border border-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-100" href=(cancel_href) { "Cancel" }
        }
    }
}

fn error_box(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="rounded-md border border-red-300 bg-red-50 p-4" {
                p class="font-semibold text-red-800" { "Please fix the following:" }
                ul class="mt-2 list-disc pl-5 text-sm text-red-700" {
                    @for error in errors {
                        li { (error.message) }
                    }
                }
            }
        }
    }
}

fn flash_banner(flash: &Flash) -> Markup {
    let classes = match flash {
        Flash::Success(_) => "mb-6 rounded-md border border-green-300 bg-green-50 p-4 text-green-800",
        Flash::Error(_) => "mb-6 rounded-md border border-red-300 bg-red-50 p-4 text-red-800",
    };
    html! {
        div class=(classes) { (flash.message()) }
    }
}

/// Listing url that keeps the active filters while switching sort or page.
fn catalog_url(query: &CatalogQuery, sort: SortOrder, page: u64) -> String {
    let mut params = Vec::new();
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("search={}", urlencoding::encode(search)));
    }
    if let Some(genre) = query.genre.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("genre={}", urlencoding::encode(genre)));
    }
    if let Some(year) = query.year {
        params.push(format!("year={year}"));
    }
    if !sort.token().is_empty() {
        params.push(format!("sort={}", sort.token()));
    }
    if page > 1 {
        params.push(format!("page={page}"));
    }

    if params.is_empty() { "/".to_string() } else { format!("/?{}", params.join("&")) }
}

fn format_timestamp(epoch_seconds: i64) -> String {
    match jiff::Timestamp::from_second(epoch_seconds) {
        Ok(ts) => ts.strftime("%Y-%m-%d %H:%M").to_string(),
        Err(_) => String::new(),
    }
}
