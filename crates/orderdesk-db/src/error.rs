//! # Database Error Types
//!
//! Error types for descriptor building, row mapping and data access.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  EntityDescriptor::of()  ──► SchemaError   (repository construction)   │
//! │  materialize(row)        ──► MappingError  (one row, aborts the call)  │
//! │  SQLite (sqlx::Error)    ──► data access variants                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (service layer) ← joined with CoreError                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::schema::SemanticType;

// =============================================================================
// Schema Error
// =============================================================================

/// An entity's field table cannot be turned into a descriptor.
///
/// Fatal to repository construction: a repository never exists without a
/// valid descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Every declared field is transient (or none were declared).
    #[error("{entity} has no persistent fields")]
    NoPersistentFields { entity: String },

    /// The identity column is not one of the persistent field names.
    #[error("{entity} has no persistent field named '{id_column}' (identity column)")]
    UnknownIdColumn { entity: String, id_column: String },

    /// Two persistent fields share a column name.
    #[error("{entity} declares column '{column}' more than once")]
    DuplicateColumn { entity: String, column: String },

    /// A lookup named a column the entity does not have.
    #[error("{entity} has no column '{column}'")]
    UnknownColumn { entity: String, column: String },
}

// =============================================================================
// Mapping Error
// =============================================================================

/// A row cannot be materialized into an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The row has no column for a persistent field.
    #[error("{entity}: column '{column}' is missing from the row")]
    MissingColumn { entity: String, column: String },

    /// The column value cannot be converted to the field's type.
    #[error("column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: SemanticType,
        found: String,
    },

    /// SQLite returned a storage class the mapper does not handle (BLOB).
    #[error("column '{column}': unsupported storage class {storage}")]
    UnsupportedValue { column: String, storage: String },
}

// =============================================================================
// Db Error
// =============================================================================

/// Database operation errors.
///
/// Everything other than [`DbError::Schema`] and [`DbError::Mapping`] is a
/// data access failure: the store rejected or could not run a statement.
#[derive(Debug, Error)]
pub enum DbError {
    /// Descriptor could not be built.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A fetched row could not be materialized.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Order referencing a non-existent client or product
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (e.g. negative stock).
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// An INSERT succeeded but produced no generated key.
    #[error("Insert into {entity} returned no generated key")]
    MissingGeneratedKey { entity: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed to commit.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// True when the store itself failed, as opposed to a schema or
    /// mapping problem in this crate.
    pub fn is_data_access(&self) -> bool {
        !matches!(
            self,
            DbError::Schema(_)
                | DbError::Mapping(_)
                | DbError::InvalidConfig(_)
                | DbError::ConfigLoadFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                // "CHECK constraint failed: <expr>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for DbError {
    fn from(err: toml::de::Error) -> Self {
        DbError::ConfigLoadFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_converts() {
        let err: DbError = SchemaError::NoPersistentFields {
            entity: "Client".to_string(),
        }
        .into();
        assert!(matches!(err, DbError::Schema(_)));
        assert!(!err.is_data_access());
    }

    #[test]
    fn test_data_access_classification() {
        assert!(DbError::PoolExhausted.is_data_access());
        assert!(DbError::QueryFailed("no such table: Client".into()).is_data_access());
        assert!(!DbError::InvalidConfig("max_connections".into()).is_data_access());
    }

    #[test]
    fn test_mapping_error_message() {
        let err = MappingError::TypeMismatch {
            column: "age".to_string(),
            expected: SemanticType::Int,
            found: "TEXT".to_string(),
        };
        assert_eq!(err.to_string(), "column 'age': expected INTEGER, found TEXT");
    }
}
