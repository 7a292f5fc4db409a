use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::entities::movie;
use crate::error::AppResult;

struct SeedMovie {
    id: i32,
    title: &'static str,
    director: &'static str,
    genre: &'static str,
    year: i32,
    rating: f64,
    rating_count: i32,
    description: &'static str,
}

/// Catalog contents for a fresh install.
const SEED_MOVIES: &[SeedMovie] = &[
    SeedMovie {
        id: 1,
        title: "Interstellar",
        director: "Christopher Nolan",
        genre: "Sci-Fi",
        year: 2014,
        rating: 8.6,
        rating_count: 1520,
        description: "A team of explorers travels through a newly discovered wormhole to surpass \
                      the limits of human space travel and cross interstellar distances.",
    },
    SeedMovie {
        id: 2,
        title: "The Godfather",
        director: "Francis Ford Coppola",
        genre: "Drama, Crime",
        year: 1972,
        rating: 9.2,
        rating_count: 2100,
        description: "The story of the powerful Italian-American Corleone crime family and the \
                      transfer of power from father to son.",
    },
    SeedMovie {
        id: 3,
        title: "The Dark Knight",
        director: "Christopher Nolan",
        genre: "Action, Crime",
        year: 2008,
        rating: 9.0,
        rating_count: 1850,
        description: "Batman faces a new threat in the Joker, a criminal mastermind who plunges \
                      Gotham City into chaos.",
    },
    SeedMovie {
        id: 4,
        title: "Forrest Gump",
        director: "Robert Zemeckis",
        genre: "Drama, Romance",
        year: 1994,
        rating: 8.8,
        rating_count: 1620,
        description: "The life story of a simple-hearted man who witnesses the defining events \
                      of late twentieth century America.",
    },
    SeedMovie {
        id: 5,
        title: "Inception",
        director: "Christopher Nolan",
        genre: "Sci-Fi, Thriller",
        year: 2010,
        rating: 8.7,
        rating_count: 1700,
        description: "A thief who steals corporate secrets through shared dreaming is given the \
                      inverse task of planting an idea into a target's mind.",
    },
    SeedMovie {
        id: 6,
        title: "The Matrix",
        director: "The Wachowskis",
        genre: "Sci-Fi, Action",
        year: 1999,
        rating: 8.7,
        rating_count: 1680,
        description: "A computer hacker learns the true nature of his reality and his role in \
                      the war against its controllers.",
    },
    SeedMovie {
        id: 7,
        title: "The Green Mile",
        director: "Frank Darabont",
        genre: "Drama, Mystery",
        year: 1999,
        rating: 8.5,
        rating_count: 1420,
        description: "A death row guard meets a condemned prisoner with an extraordinary \
                      supernatural gift.",
    },
    SeedMovie {
        id: 8,
        title: "The Shawshank Redemption",
        director: "Frank Darabont",
        genre: "Drama",
        year: 1994,
        rating: 9.3,
        rating_count: 2300,
        description: "Two imprisoned men bond over a number of years, finding solace and \
                      eventual redemption through acts of common decency.",
    },
    SeedMovie {
        id: 9,
        title: "Schindler's List",
        director: "Steven Spielberg",
        genre: "Drama, History",
        year: 1993,
        rating: 8.9,
        rating_count: 1560,
        description: "A German industrialist saves the lives of more than a thousand Jewish \
                      refugees during the Holocaust.",
    },
    SeedMovie {
        id: 10,
        title: "Fight Club",
        director: "David Fincher",
        genre: "Drama, Thriller",
        year: 1999,
        rating: 8.8,
        rating_count: 1750,
        description: "An insomniac office worker and a charismatic soap maker form an \
                      underground fight club that spirals out of control.",
    },
];

/// Populates the catalog on first startup. A non-empty table is left alone.
pub async fn seed_movies(db: &DatabaseConnection) -> AppResult<()> {
    if movie::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    for seed in SEED_MOVIES {
        movie::ActiveModel {
            id: Set(seed.id),
            title: Set(seed.title.to_string()),
            director: Set(seed.director.to_string()),
            genre: Set(seed.genre.to_string()),
            year: Set(seed.year),
            poster_url: Set(format!("/images/movies/{}.jpg", seed.id)),
            description: Set(seed.description.to_string()),
            rating: Set(seed.rating),
            rating_count: Set(seed.rating_count),
        }
        .insert(db)
        .await?;
    }

    info!("seeded {} movies", SEED_MOVIES.len());
    Ok(())
}
