use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

/// Cascade deletion of comments requires foreign_keys on every pooled
/// connection; sqlx's SQLite driver enables it by default, the pragma here
/// covers databases opened with it turned off.
const PRAGMAS: &[&str] =
    &["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA foreign_keys=ON"];

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), (*pragma).to_string()))
            .await?;
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}
