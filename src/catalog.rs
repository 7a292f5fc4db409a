use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::entities::movie;
use crate::error::AppResult;

pub const PAGE_SIZE: u64 = 6;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    #[default]
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
    RatingAsc,
    RatingDesc,
}

impl SortOrder {
    /// Unknown tokens fall back to sorting by title.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.unwrap_or("") {
            "title_desc" => Self::TitleDesc,
            "year" => Self::YearAsc,
            "year_desc" => Self::YearDesc,
            "rating" => Self::RatingAsc,
            "rating_desc" => Self::RatingDesc,
            _ => Self::TitleAsc,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::TitleAsc => "",
            Self::TitleDesc => "title_desc",
            Self::YearAsc => "year",
            Self::YearDesc => "year_desc",
            Self::RatingAsc => "rating",
            Self::RatingDesc => "rating_desc",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub sort: SortOrder,
    pub page: u64,
}

#[derive(Clone, Debug)]
pub struct CatalogPage {
    pub movies: Vec<movie::Model>,
    pub page: u64,
    pub total_pages: u64,
    /// Distinct genre values over the whole table, for the filter dropdown.
    pub genres: Vec<String>,
    /// Distinct years over the whole table, newest first.
    pub years: Vec<i32>,
}

/// One page of the catalog under the given filters, plus the filter option
/// sets. Filters compose with AND; a page past the end comes back empty
/// rather than clamped.
pub async fn fetch_page(db: &DatabaseConnection, query: &CatalogQuery) -> AppResult<CatalogPage> {
    let mut select = movie::Entity::find();

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(movie::Column::Title.contains(term))
                .add(movie::Column::Director.contains(term)),
        );
    }

    if let Some(genre) = query.genre.as_deref().filter(|s| !s.is_empty()) {
        // Substring match so one tag inside "Drama, Crime" hits.
        select = select.filter(movie::Column::Genre.contains(genre));
    }

    if let Some(year) = query.year {
        select = select.filter(movie::Column::Year.eq(year));
    }

    let total = select.clone().count(db).await?;
    let total_pages = total.div_ceil(PAGE_SIZE);

    let select = match query.sort {
        SortOrder::TitleAsc => select.order_by_asc(movie::Column::Title),
        SortOrder::TitleDesc => select.order_by_desc(movie::Column::Title),
        SortOrder::YearAsc => select.order_by_asc(movie::Column::Year),
        SortOrder::YearDesc => select.order_by_desc(movie::Column::Year),
        SortOrder::RatingAsc => select.order_by_asc(movie::Column::Rating),
        SortOrder::RatingDesc => select.order_by_desc(movie::Column::Rating),
    };

    let page = query.page.max(1);
    let movies =
        select.offset((page - 1) * PAGE_SIZE).limit(PAGE_SIZE).all(db).await?;

    let genres = movie::Entity::find()
        .select_only()
        .column(movie::Column::Genre)
        .distinct()
        .order_by_asc(movie::Column::Genre)
        .into_tuple::<String>()
        .all(db)
        .await?;

    let years = movie::Entity::find()
        .select_only()
        .column(movie::Column::Year)
        .distinct()
        .order_by_desc(movie::Column::Year)
        .into_tuple::<i32>()
        .all(db)
        .await?;

    Ok(CatalogPage { movies, page, total_pages, genres, years })
}
