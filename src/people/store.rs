use std::str::FromStr;

use sqlx::{
    query_builder::Separated,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};

use crate::item::rdbc::{sqlite_writer::SqliteItemWriter, DatabaseItemBinder};

use super::records::PersonOut;

pub const PEOPLE_TABLE: &str = "people";

/// Binds `first_name` then `last_name`.
#[derive(Default)]
pub struct PersonBinder;

impl DatabaseItemBinder<PersonOut, Sqlite> for PersonBinder {
    fn bind(&self, item: &PersonOut, mut query_builder: Separated<Sqlite, &str>) {
        query_builder.push_bind(item.first_name.clone());
        query_builder.push_bind(item.last_name.clone());
    }
}

/// Writer inserting people into the `people` table.
pub fn people_writer<'a>(
    pool: &'a SqlitePool,
    binder: &'a PersonBinder,
) -> SqliteItemWriter<'a, PersonOut> {
    SqliteItemWriter::new()
        .pool(pool)
        .table(PEOPLE_TABLE)
        .add_column("first_name")
        .add_column("last_name")
        .item_binder(binder)
}

/// Opens the target database, creating the file if needed.
///
/// The pool holds a single long-lived connection: an in-memory database only
/// lives as long as the connection that created it.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Creates the `people` table when it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            person_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Reads back every person, in insertion order.
pub async fn find_people(pool: &SqlitePool) -> Result<Vec<PersonOut>, sqlx::Error> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT first_name, last_name FROM people ORDER BY person_id")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(first_name, last_name)| PersonOut::new(first_name, last_name))
        .collect())
}
