use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::core::item::{ItemWriter, ItemWriterResult};
use crate::item::rdbc::DatabaseItemBinder;
use crate::BatchError;

// Default SQLITE_MAX_VARIABLE_NUMBER since SQLite 3.32
const BIND_LIMIT: usize = 32766;

/// A writer for inserting items into a SQLite database using SQLx.
///
/// Each chunk is written in a single transaction: the items are inserted with
/// multi-row `INSERT INTO table (columns) VALUES (?, ...), ...` statements,
/// as many as the bind-parameter limit requires, and the transaction commits
/// only when all of them succeeded. A failing row rolls back the whole chunk.
///
/// # Runtime
///
/// The `ItemWriter` contract is synchronous. The writer drives SQLx with
/// `tokio::task::block_in_place`, so it must be called from within a
/// multi-threaded Tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use people_batch::item::rdbc::sqlite_writer::SqliteItemWriter;
/// use people_batch::item::rdbc::DatabaseItemBinder;
/// use sqlx::{SqlitePool, query_builder::Separated, Sqlite};
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
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite://database.db").await?;
/// let binder = UserBinder;
///
/// let writer = SqliteItemWriter::<User>::new()
///     .pool(&pool)
///     .table("users")
///     .add_column("id")
///     .add_column("name")
///     .item_binder(&binder);
/// # Ok(())
/// # }
/// ```
pub struct SqliteItemWriter<'a, O> {
    pool: Option<&'a Pool<Sqlite>>,
    table: Option<&'a str>,
    columns: Vec<&'a str>,
    item_binder: Option<&'a dyn DatabaseItemBinder<O, Sqlite>>,
    bind_limit: usize,
}

impl<O> Default for SqliteItemWriter<'_, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, O> SqliteItemWriter<'a, O> {
    /// Creates a new `SqliteItemWriter` with default configuration.
    ///
    /// The pool, table, columns and item binder must be set before use;
    /// a missing one is reported as `BatchError::Configuration` when the
    /// writer is opened or written to.
    pub fn new() -> Self {
        Self {
            pool: None,
            table: None,
            columns: Vec::new(),
            item_binder: None,
            bind_limit: BIND_LIMIT,
        }
    }

    pub fn pool(mut self, pool: &'a Pool<Sqlite>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn table(mut self, table: &'a str) -> Self {
        self.table = Some(table);
        self
    }

    /// Adds a column to the writer.
    ///
    /// This method can be called multiple times to add multiple columns.
    /// The binder must push one value per column, in the same order.
    pub fn add_column(mut self, column: &'a str) -> Self {
        self.columns.push(column);
        self
    }

    pub fn item_binder(mut self, item_binder: &'a dyn DatabaseItemBinder<O, Sqlite>) -> Self {
        self.item_binder = Some(item_binder);
        self
    }

    /// Caps the number of bind parameters of a single statement.
    pub fn max_bind_parameters(mut self, bind_limit: usize) -> Self {
        self.bind_limit = bind_limit;
        self
    }

    #[allow(clippy::type_complexity)]
    fn configuration(
        &self,
    ) -> Result<(&'a Pool<Sqlite>, &'a str, &'a dyn DatabaseItemBinder<O, Sqlite>), BatchError>
    {
        let missing =
            |what: &str| BatchError::Configuration(format!("SQLite writer has no {}", what));

        let pool = self.pool.ok_or_else(|| missing("pool"))?;
        let table = self.table.ok_or_else(|| missing("table"))?;
        let item_binder = self.item_binder.ok_or_else(|| missing("item binder"))?;

        if self.columns.is_empty() {
            return Err(missing("column"));
        }

        if self.bind_limit < self.columns.len() {
            return Err(BatchError::Configuration(format!(
                "SQLite writer cannot bind {} columns with {} parameters",
                self.columns.len(),
                self.bind_limit
            )));
        }

        Ok((pool, table, item_binder))
    }

    fn rows_per_statement(&self) -> usize {
        self.bind_limit / self.columns.len()
    }
}

impl<O> ItemWriter<O> for SqliteItemWriter<'_, O> {
    fn write(&self, items: &[O]) -> ItemWriterResult {
        if items.is_empty() {
            return Ok(());
        }

        let (pool, table, item_binder) = self.configuration()?;
        let columns = self.columns.join(", ");

        let result = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let mut transaction = pool.begin().await?;

                for rows in items.chunks(self.rows_per_statement()) {
                    let mut query_builder = QueryBuilder::<Sqlite>::new("INSERT INTO ");
                    query_builder.push(table);
                    query_builder.push(" (");
                    query_builder.push(&columns);
                    query_builder.push(") ");
                    query_builder.push_values(rows, |b, item| item_binder.bind(item, b));

                    query_builder.build().execute(&mut *transaction).await?;
                }

                transaction.commit().await
            })
        });

        match result {
            Ok(()) => {
                log::debug!(
                    "Successfully wrote {} items to SQLite table {}",
                    items.len(),
                    table
                );
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to write items to SQLite table {}: {}", table, e);
                Err(BatchError::ItemWriter(format!("SQLite write failed: {}", e)))
            }
        }
    }

    fn open(&self) -> ItemWriterResult {
        self.configuration().map(|_| ())
    }
}
