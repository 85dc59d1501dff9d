use sqlx::{query_builder::Separated, Database};

/// This module contains the SQLite bulk-insert writer.
#[cfg(feature = "rdbc-sqlite")]
pub mod sqlite_writer;

/// Trait for binding item data to database query parameters.
///
/// This trait is generic over the database type so that one binder shape
/// serves every database supported by SQLx. Values are pushed as bind
/// parameters, never concatenated into the SQL text.
///
/// # Type Parameters
///
/// * `O` - The item type to bind
/// * `DB` - The SQLx database type (e.g., `Sqlite`)
///
/// # Examples
///
/// ```
/// use people_batch::item::rdbc::DatabaseItemBinder;
/// use sqlx::{query_builder::Separated, Sqlite};
///
/// struct User {
///     id: i32,
///     name: String,
/// }
///
/// struct UserBinder;
/// impl DatabaseItemBinder<User, Sqlite> for UserBinder {
///     fn bind(&self, item: &User, mut query_builder: Separated<Sqlite, &str>) {
///         query_builder.push_bind(item.id);
///         query_builder.push_bind(item.name.clone());
///     }
/// }
/// ```
pub trait DatabaseItemBinder<O, DB: Database> {
    /// Binds the properties of an item to a separated query builder, one
    /// `push_bind` per configured column, in column order.
    fn bind(&self, item: &O, query_builder: Separated<DB, &str>);
}

#[cfg(feature = "rdbc-sqlite")]
pub use sqlite_writer::SqliteItemWriter;
