//! # Generic Repository
//!
//! CRUD for any [`Entity`], driven entirely by its descriptor.
//!
//! ## Call Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  repo.insert(client)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pool.acquire()             ← PoolConnection guard                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_insert_generated()   ← SQL text from the descriptor             │
//! │  bind non-id values         ← declaration order                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  execute → last_insert_rowid → descriptor.assign_id(client)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  guard dropped              ← connection back in the pool on every    │
//! │                               exit path, errors included              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read and write has an `*_on` variant taking a `&mut SqliteConnection`,
//! so services can run several operations inside one transaction
//! (`&mut *tx`).

use std::fmt;
use std::sync::Arc;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, error, warn};

use crate::error::{DbError, DbResult, SchemaError};
use crate::schema::query::{
    build_delete, build_insert, build_insert_generated, build_select_all, build_select_by_field,
    build_update,
};
use crate::schema::{materialize_all, Entity, EntityDescriptor, Row, Value};

// =============================================================================
// Listing
// =============================================================================

/// Result of a find-all that degrades to empty instead of failing.
///
/// `failure` holds the error that was logged when the list came back empty
/// because of it.
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub failure: Option<DbError>,
}

impl<T> Listing<T> {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

// =============================================================================
// Generic Repository
// =============================================================================

pub struct GenericRepository<T> {
    pool: SqlitePool,
    descriptor: Arc<EntityDescriptor<T>>,
}

impl<T> Clone for GenericRepository<T> {
    fn clone(&self) -> Self {
        GenericRepository {
            pool: self.pool.clone(),
            descriptor: Arc::clone(&self.descriptor),
        }
    }
}

impl<T> fmt::Debug for GenericRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRepository")
            .field("entity", &self.descriptor.type_name())
            .field("table", &self.descriptor.table_name())
            .finish()
    }
}

fn bind_all(sql: &str, values: Vec<Value>) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    values
        .into_iter()
        .fold(sqlx::query(sql), |query, value| value.bind_to(query))
}

impl<T: Entity> GenericRepository<T> {
    /// Creates a repository, building `T`'s descriptor.
    ///
    /// ## Errors
    /// * `DbError::Schema` - the field table of `T` is invalid
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        let descriptor = EntityDescriptor::<T>::of()?;
        Ok(GenericRepository {
            pool,
            descriptor: Arc::new(descriptor),
        })
    }

    pub fn descriptor(&self) -> &EntityDescriptor<T> {
        &self.descriptor
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// One bad row fails the whole call.
    fn materialize_rows(&self, raw: &[SqliteRow]) -> DbResult<Vec<T>> {
        let rows = raw
            .iter()
            .map(Row::from_sqlite)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(materialize_all(&rows, &self.descriptor)?)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches every row of the entity's table.
    ///
    /// Returns an empty vector for an empty table.
    pub async fn find_all(&self) -> DbResult<Vec<T>> {
        let mut conn = self.pool.acquire().await?;
        self.find_all_on(&mut conn).await
    }

    pub async fn find_all_on(&self, conn: &mut SqliteConnection) -> DbResult<Vec<T>> {
        let sql = build_select_all(self.descriptor.table_name());
        debug!(entity = T::TYPE_NAME, sql = %sql, "Fetching all");

        let raw = sqlx::query(&sql).fetch_all(&mut *conn).await?;
        let items = self.materialize_rows(&raw)?;

        debug!(entity = T::TYPE_NAME, count = items.len(), "Fetched rows");
        Ok(items)
    }

    /// Fetches the entity whose identity column equals `id`.
    ///
    /// ## Returns
    /// * `Ok(Some(T))` - exactly one row matched
    /// * `Ok(None)` - no row (or, for a non-key table override, several)
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<T>> {
        let mut conn = self.pool.acquire().await?;
        self.find_by_id_on(&mut conn, id, self.descriptor.table_name())
            .await
    }

    /// Like [`find_by_id`](Self::find_by_id), reading from `table` instead
    /// of the descriptor's table.
    pub async fn find_by_id_in(&self, id: i64, table: &str) -> DbResult<Option<T>> {
        if table != self.descriptor.table_name() {
            warn!(
                entity = T::TYPE_NAME,
                table = %table,
                declared = self.descriptor.table_name(),
                "Table override differs from the entity's table"
            );
        }

        let mut conn = self.pool.acquire().await?;
        self.find_by_id_on(&mut conn, id, table).await
    }

    pub async fn find_by_id_on(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        table: &str,
    ) -> DbResult<Option<T>> {
        let sql = build_select_by_field(table, self.descriptor.id_column());
        debug!(entity = T::TYPE_NAME, id = id, sql = %sql, "Fetching by id");

        let raw = sqlx::query(&sql).bind(id).fetch_all(&mut *conn).await?;

        if raw.len() > 1 {
            warn!(
                entity = T::TYPE_NAME,
                id = id,
                count = raw.len(),
                "Identity lookup matched more than one row"
            );
            return Ok(None);
        }

        Ok(self.materialize_rows(&raw)?.pop())
    }

    /// Fetches every entity whose `column` equals `value`.
    ///
    /// ## Errors
    /// * `DbError::Schema(UnknownColumn)` - `column` is not a persistent field
    pub async fn find_by_field(&self, column: &str, value: impl Into<Value>) -> DbResult<Vec<T>> {
        let mut conn = self.pool.acquire().await?;
        self.find_by_field_on(&mut conn, column, value.into()).await
    }

    pub async fn find_by_field_on(
        &self,
        conn: &mut SqliteConnection,
        column: &str,
        value: Value,
    ) -> DbResult<Vec<T>> {
        if !self.descriptor.has_column(column) {
            return Err(SchemaError::UnknownColumn {
                entity: T::TYPE_NAME.to_string(),
                column: column.to_string(),
            }
            .into());
        }

        let sql = build_select_by_field(self.descriptor.table_name(), column);
        debug!(entity = T::TYPE_NAME, sql = %sql, value = %value, "Fetching by field");

        let raw = bind_all(&sql, vec![value]).fetch_all(&mut *conn).await?;
        self.materialize_rows(&raw)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts `entity`, letting the store generate its identity.
    ///
    /// The generated key is written into the identity field of the
    /// returned entity.
    ///
    /// ## Errors
    /// * `DbError::MissingGeneratedKey` - the statement inserted nothing
    /// * constraint variants - the store rejected the row
    pub async fn insert(&self, entity: T) -> DbResult<T> {
        let mut conn = self.pool.acquire().await?;
        self.insert_on(&mut conn, entity).await
    }

    pub async fn insert_on(&self, conn: &mut SqliteConnection, mut entity: T) -> DbResult<T> {
        let sql = build_insert_generated(&self.descriptor);
        debug!(entity = T::TYPE_NAME, sql = %sql, "Inserting");

        let result = bind_all(&sql, self.descriptor.non_id_values(&entity))
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(entity = T::TYPE_NAME, error = %e, "Insert failed");
                DbError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::MissingGeneratedKey {
                entity: T::TYPE_NAME.to_string(),
            });
        }

        let key = result.last_insert_rowid();
        self.descriptor.assign_id(&mut entity, &Value::Int(key))?;

        debug!(entity = T::TYPE_NAME, id = key, "Inserted");
        Ok(entity)
    }

    /// Inserts `entity` with the identity it already carries.
    pub async fn insert_with_id(&self, entity: T) -> DbResult<T> {
        let mut conn = self.pool.acquire().await?;
        self.insert_with_id_on(&mut conn, entity).await
    }

    pub async fn insert_with_id_on(&self, conn: &mut SqliteConnection, entity: T) -> DbResult<T> {
        let sql = build_insert(&self.descriptor);
        debug!(entity = T::TYPE_NAME, sql = %sql, "Inserting with explicit id");

        bind_all(&sql, self.descriptor.values(&entity))
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(entity = T::TYPE_NAME, error = %e, "Insert failed");
                DbError::from(e)
            })?;

        Ok(entity)
    }

    /// Writes every non-identity field of `entity` to the row with its id.
    ///
    /// The affected-row count is not checked: updating an id that does not
    /// exist changes nothing and still returns the entity.
    pub async fn update(&self, entity: T) -> DbResult<T> {
        let mut conn = self.pool.acquire().await?;
        self.update_on(&mut conn, entity).await
    }

    pub async fn update_on(&self, conn: &mut SqliteConnection, entity: T) -> DbResult<T> {
        let sql = build_update(&self.descriptor);

        let mut values = self.descriptor.non_id_values(&entity);
        let id = self.descriptor.id_value(&entity);
        debug!(entity = T::TYPE_NAME, id = %id, sql = %sql, "Updating");
        values.push(id);

        let result = bind_all(&sql, values)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(entity = T::TYPE_NAME, error = %e, "Update failed");
                DbError::from(e)
            })?;

        debug!(
            entity = T::TYPE_NAME,
            rows = result.rows_affected(),
            "Update executed"
        );
        Ok(entity)
    }

    /// Deletes the row with identity `id`, returning the affected count.
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        let mut conn = self.pool.acquire().await?;
        self.delete_on(&mut conn, id).await
    }

    pub async fn delete_on(&self, conn: &mut SqliteConnection, id: i64) -> DbResult<u64> {
        let sql = build_delete(&self.descriptor);
        debug!(entity = T::TYPE_NAME, id = id, sql = %sql, "Deleting");

        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    // Degrading Reads
    // =========================================================================

    /// [`find_all`](Self::find_all) that never fails.
    ///
    /// On error the listing is empty and carries the (logged) failure.
    pub async fn find_all_or_degrade(&self) -> Listing<T> {
        match self.find_all().await {
            Ok(items) => Listing {
                items,
                failure: None,
            },
            Err(e) => {
                warn!(entity = T::TYPE_NAME, error = %e, "Listing degraded to empty");
                Listing {
                    items: Vec::new(),
                    failure: Some(e),
                }
            }
        }
    }

    /// [`find_by_id`](Self::find_by_id) that logs failures and reports
    /// them as absent.
    pub async fn find_by_id_or_absent(&self, id: i64) -> Option<T> {
        match self.find_by_id(id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(entity = T::TYPE_NAME, id = id, error = %e, "Lookup failed, treating as absent");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
