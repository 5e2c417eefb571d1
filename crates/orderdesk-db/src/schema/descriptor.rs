//! # Entity Descriptors
//!
//! A descriptor is the column layout of one persistent type: its table,
//! its identity column and an ordered list of fields, each carrying a typed
//! accessor and mutator.
//!
//! ## Declaring an Entity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  impl Entity for Client                                                 │
//! │                                                                         │
//! │  TYPE_NAME = "Client"      TABLE = TYPE_NAME     ID_COLUMN = "idClient" │
//! │                                                                         │
//! │  fields():                                                              │
//! │    ┌────────────┬────────┬──────────────┬─────────────────────────┐    │
//! │    │ column     │ type   │ accessor     │ mutator                 │    │
//! │    ├────────────┼────────┼──────────────┼─────────────────────────┤    │
//! │    │ idClient   │ Int    │ |c| c.id     │ |c, v| c.id = v         │    │
//! │    │ name       │ Text   │ |c| &c.name  │ |c, v| c.name = v       │    │
//! │    │ ...        │        │              │                         │    │
//! │    └────────────┴────────┴──────────────┴─────────────────────────┘    │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  EntityDescriptor::<Client>::of()                                      │
//! │    • drops transient fields                                            │
//! │    • rejects: no persistent fields, unknown ID_COLUMN, duplicates      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field order is significant: it is the INSERT column order and the
//! bound-parameter order.

use crate::error::{MappingError, SchemaError};
use crate::schema::materialize::materialize;
use crate::schema::value::{Row, SemanticType, Value};

// =============================================================================
// Entity Trait
// =============================================================================

/// A type the generic repository can persist.
///
/// `Default` is the zero-argument construction path used when
/// materializing rows.
pub trait Entity: Default + Send + Sync + Unpin + Sized + 'static {
    /// Short type name, used in logs and errors.
    const TYPE_NAME: &'static str;

    /// Table holding this entity. Defaults to the type name.
    const TABLE: &'static str = Self::TYPE_NAME;

    /// Column of the store-generated identity.
    const ID_COLUMN: &'static str;

    /// Field table in declaration order.
    fn fields() -> Vec<FieldSpec<Self>>;

    /// Row → entity hook. Override to post-process or to read columns by
    /// hand; the default assigns every descriptor field.
    fn from_row(row: &Row, descriptor: &EntityDescriptor<Self>) -> Result<Self, MappingError> {
        materialize(row, descriptor)
    }
}

// =============================================================================
// Field Spec
// =============================================================================

/// Typed accessor/mutator pair of one field.
pub enum FieldAccess<T> {
    Int {
        get: fn(&T) -> i64,
        set: fn(&mut T, i64),
    },
    Text {
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },
    Double {
        get: fn(&T) -> f64,
        set: fn(&mut T, f64),
    },
}

impl<T> Clone for FieldAccess<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldAccess<T> {}

/// One persistent (or transient) field of an entity.
pub struct FieldSpec<T> {
    name: &'static str,
    access: FieldAccess<T>,
    transient: bool,
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("semantic_type", &self.semantic_type())
            .field("transient", &self.transient)
            .finish()
    }
}

impl<T> FieldSpec<T> {
    /// An integer column.
    pub fn int(name: &'static str, get: fn(&T) -> i64, set: fn(&mut T, i64)) -> Self {
        FieldSpec {
            name,
            access: FieldAccess::Int { get, set },
            transient: false,
        }
    }

    /// A text column.
    pub fn text(name: &'static str, get: fn(&T) -> &str, set: fn(&mut T, String)) -> Self {
        FieldSpec {
            name,
            access: FieldAccess::Text { get, set },
            transient: false,
        }
    }

    /// A real-number column.
    pub fn double(name: &'static str, get: fn(&T) -> f64, set: fn(&mut T, f64)) -> Self {
        FieldSpec {
            name,
            access: FieldAccess::Double { get, set },
            transient: false,
        }
    }

    /// Marks the field as computed: it stays out of every statement.
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Column name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self.access {
            FieldAccess::Int { .. } => SemanticType::Int,
            FieldAccess::Text { .. } => SemanticType::Text,
            FieldAccess::Double { .. } => SemanticType::Double,
        }
    }

    /// Reads the field from an entity.
    pub fn read(&self, entity: &T) -> Value {
        match self.access {
            FieldAccess::Int { get, .. } => Value::Int(get(entity)),
            FieldAccess::Text { get, .. } => Value::Text(get(entity).to_string()),
            FieldAccess::Double { get, .. } => Value::Double(get(entity)),
        }
    }

    /// Coerces `value` to the field's type and assigns it.
    pub fn write(&self, entity: &mut T, value: &Value) -> Result<(), MappingError> {
        match self.access {
            FieldAccess::Int { set, .. } => set(entity, value.to_int(self.name)?),
            FieldAccess::Text { set, .. } => set(entity, value.to_text(self.name)?),
            FieldAccess::Double { set, .. } => set(entity, value.to_double(self.name)?),
        }
        Ok(())
    }
}

// =============================================================================
// Entity Descriptor
// =============================================================================

/// Immutable column layout of an entity type.
pub struct EntityDescriptor<T> {
    type_name: &'static str,
    table_name: &'static str,
    id_column: &'static str,
    fields: Vec<FieldSpec<T>>,
    id_index: usize,
}

impl<T> std::fmt::Debug for EntityDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("type_name", &self.type_name)
            .field("table_name", &self.table_name)
            .field("id_column", &self.id_column)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T: Entity> EntityDescriptor<T> {
    /// Builds the descriptor declared by `T`.
    pub fn of() -> Result<Self, SchemaError> {
        Self::build(T::TYPE_NAME, T::TABLE, T::ID_COLUMN, T::fields())
    }
}

impl<T> EntityDescriptor<T> {
    /// Builds a descriptor from an explicit field table.
    ///
    /// ## Errors
    /// * `NoPersistentFields` - every field is transient
    /// * `DuplicateColumn` - two persistent fields share a name
    /// * `UnknownIdColumn` - `id_column` is not a persistent field
    ///   (case-sensitive)
    pub fn build(
        type_name: &'static str,
        table_name: &'static str,
        id_column: &'static str,
        fields: Vec<FieldSpec<T>>,
    ) -> Result<Self, SchemaError> {
        let fields: Vec<FieldSpec<T>> = fields.into_iter().filter(|f| !f.transient).collect();

        if fields.is_empty() {
            return Err(SchemaError::NoPersistentFields {
                entity: type_name.to_string(),
            });
        }

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|earlier| earlier.name == field.name) {
                return Err(SchemaError::DuplicateColumn {
                    entity: type_name.to_string(),
                    column: field.name.to_string(),
                });
            }
        }

        let id_index = fields
            .iter()
            .position(|f| f.name == id_column)
            .ok_or_else(|| SchemaError::UnknownIdColumn {
                entity: type_name.to_string(),
                id_column: id_column.to_string(),
            })?;

        Ok(EntityDescriptor {
            type_name,
            table_name,
            id_column,
            fields,
            id_index,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    pub fn id_column(&self) -> &'static str {
        self.id_column
    }

    /// Persistent fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    pub fn id_field(&self) -> &FieldSpec<T> {
        &self.fields[self.id_index]
    }

    /// Persistent fields other than the identity, in declaration order.
    pub fn non_id_fields(&self) -> impl Iterator<Item = &FieldSpec<T>> {
        self.fields
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.id_index)
            .map(|(_, field)| field)
    }

    /// Checks whether `column` is a persistent field.
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|f| f.name == column)
    }

    /// Every persistent value, in declaration order.
    pub fn values(&self, entity: &T) -> Vec<Value> {
        self.fields.iter().map(|f| f.read(entity)).collect()
    }

    /// Non-identity values, in declaration order.
    pub fn non_id_values(&self, entity: &T) -> Vec<Value> {
        self.non_id_fields().map(|f| f.read(entity)).collect()
    }

    pub fn id_value(&self, entity: &T) -> Value {
        self.id_field().read(entity)
    }

    /// Writes a generated key into the identity field.
    pub fn assign_id(&self, entity: &mut T, key: &Value) -> Result<(), MappingError> {
        self.id_field().write(entity, key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
