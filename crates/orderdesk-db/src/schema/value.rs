//! # Values and Rows
//!
//! The dynamic scalar exchanged between entities and SQLite, and the
//! ordered column → value mapping produced for every fetched record.
//!
//! ## Type Mapping
//! ```text
//! ┌──────────────┬──────────────────┬───────────────────┐
//! │ SemanticType │ Rust field       │ SQLite storage    │
//! ├──────────────┼──────────────────┼───────────────────┤
//! │ Int          │ i64              │ INTEGER           │
//! │ Double       │ f64              │ REAL              │
//! │ Text         │ String           │ TEXT              │
//! └──────────────┴──────────────────┴───────────────────┘
//! ```

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, Sqlite, TypeInfo, ValueRef};

use crate::error::{DbResult, MappingError};

// =============================================================================
// Semantic Type
// =============================================================================

/// The declared type of a persistent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Int,
    Text,
    Double,
}

impl SemanticType {
    /// SQLite storage class name for this type.
    pub fn sql_name(&self) -> &'static str {
        match self {
            SemanticType::Int => "INTEGER",
            SemanticType::Text => "TEXT",
            SemanticType::Double => "REAL",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_name())
    }
}

// =============================================================================
// Value
// =============================================================================

/// A dynamically-typed scalar read from or bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    /// Storage class name, used in mapping errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Int(_) => "INTEGER",
            Value::Double(_) => "REAL",
            Value::Text(_) => "TEXT",
        }
    }

    fn mismatch(&self, column: &str, expected: SemanticType) -> MappingError {
        MappingError::TypeMismatch {
            column: column.to_string(),
            expected,
            found: self.kind().to_string(),
        }
    }

    /// Coerces to an integer.
    ///
    /// A REAL is accepted only when it holds a whole number.
    pub fn to_int(&self, column: &str) -> Result<i64, MappingError> {
        match self {
            Value::Int(v) => Ok(*v),
            Value::Double(v)
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64 =>
            {
                Ok(*v as i64)
            }
            other => Err(other.mismatch(column, SemanticType::Int)),
        }
    }

    /// Coerces to a double. Integers widen.
    pub fn to_double(&self, column: &str) -> Result<f64, MappingError> {
        match self {
            Value::Double(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(other.mismatch(column, SemanticType::Double)),
        }
    }

    /// Coerces to text. Only TEXT values are accepted.
    pub fn to_text(&self, column: &str) -> Result<String, MappingError> {
        match self {
            Value::Text(v) => Ok(v.clone()),
            other => Err(other.mismatch(column, SemanticType::Text)),
        }
    }

    /// Binds this value as the next positional parameter.
    pub(crate) fn bind_to<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Value::Null => query.bind(None::<i64>),
            Value::Int(v) => query.bind(v),
            Value::Double(v) => query.bind(v),
            Value::Text(v) => query.bind(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

// =============================================================================
// Row
// =============================================================================

/// An ordered column name → value mapping for one fetched record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row::default()
    }

    /// Appends a column (builder style).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Appends a column.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Value of the column whose name equals `column` exactly.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in result-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Reads every column of a SQLite row.
    ///
    /// The runtime storage class of each value decides its variant, not
    /// the declared column type.
    pub fn from_sqlite(row: &SqliteRow) -> DbResult<Self> {
        let mut columns = Vec::with_capacity(row.len());

        for (index, column) in row.columns().iter().enumerate() {
            let raw = row.try_get_raw(index)?;

            let value = if raw.is_null() {
                Value::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" => Value::Int(row.try_get(index)?),
                    "REAL" => Value::Double(row.try_get(index)?),
                    "TEXT" => Value::Text(row.try_get(index)?),
                    storage => {
                        return Err(MappingError::UnsupportedValue {
                            column: column.name().to_string(),
                            storage: storage.to_string(),
                        }
                        .into())
                    }
                }
            };

            columns.push((column.name().to_string(), value));
        }

        Ok(Row { columns })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[test]
    fn test_int_coercion() {
        assert_eq!(Value::Int(30).to_int("age").unwrap(), 30);
        assert_eq!(Value::Double(7.0).to_int("age").unwrap(), 7);
        assert!(Value::Double(7.5).to_int("age").is_err());
        assert!(Value::Text("30".into()).to_int("age").is_err());
        assert!(Value::Null.to_int("age").is_err());
    }

    #[test]
    fn test_double_and_text_coercion() {
        assert_eq!(Value::Int(5).to_double("price").unwrap(), 5.0);
        assert_eq!(Value::Double(2.5).to_double("price").unwrap(), 2.5);
        assert_eq!(Value::from("Ana").to_text("name").unwrap(), "Ana");

        let err = Value::Int(1).to_text("name").unwrap_err();
        assert_eq!(
            err,
            MappingError::TypeMismatch {
                column: "name".to_string(),
                expected: SemanticType::Text,
                found: "INTEGER".to_string(),
            }
        );
    }

    #[test]
    fn test_row_lookup_is_exact() {
        let row = Row::new().with("idClient", 4).with("name", "Ana");

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("idClient"), Some(&Value::Int(4)));
        assert_eq!(row.get("name"), Some(&Value::Text("Ana".into())));
        assert_eq!(row.get("idclient"), None);
        assert_eq!(row.get("email"), None);
    }

    #[tokio::test]
    async fn test_from_sqlite_uses_storage_class() {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let raw = sqlx::query("SELECT 1 AS a, 2.5 AS b, 'x' AS c, NULL AS d")
            .fetch_one(&pool)
            .await
            .unwrap();
        let row = Row::from_sqlite(&raw).unwrap();

        let columns: Vec<_> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(columns, vec!["a", "b", "c", "d"]);
        assert_eq!(row.get("a"), Some(&Value::Int(1)));
        assert_eq!(row.get("b"), Some(&Value::Double(2.5)));
        assert_eq!(row.get("c"), Some(&Value::Text("x".into())));
        assert_eq!(row.get("d"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_from_sqlite_ignores_declared_affinity() {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let raw = sqlx::query("SELECT 1 = 1 AS flag, CAST('2.5' AS NUMERIC) AS n, CAST('3' AS NUMERIC) AS m")
            .fetch_one(&pool)
            .await
            .unwrap();
        let row = Row::from_sqlite(&raw).unwrap();

        assert_eq!(row.get("flag"), Some(&Value::Int(1)));
        assert_eq!(row.get("n"), Some(&Value::Double(2.5)));
        assert_eq!(row.get("m"), Some(&Value::Int(3)));

        let raw = sqlx::query("SELECT x'00ff' AS data")
            .fetch_one(&pool)
            .await
            .unwrap();
        let err = Row::from_sqlite(&raw).unwrap_err();
        assert!(matches!(
            err,
            DbError::Mapping(MappingError::UnsupportedValue { ref storage, .. }) if storage == "BLOB"
        ));
    }
}
