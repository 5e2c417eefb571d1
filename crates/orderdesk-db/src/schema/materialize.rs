//! # Object Materializer
//!
//! Turns a fetched [`Row`] into a new entity instance.
//!
//! ```text
//! Row { idClient: 4, name: "Ana", address: "Main St", email: .., age: 30 }
//!      │
//!      ▼
//! Client::default()            ← zero-argument construction
//!      │
//!      ▼  for each descriptor field, in order:
//!      │    value = row[field.name]          (MissingColumn if absent)
//!      │    field.write(instance, value)     (TypeMismatch if not coercible)
//!      ▼
//! Client { id: 4, name: "Ana", ... }
//! ```
//!
//! A mapping failure aborts the whole call: no partially read result set
//! is ever returned.

use crate::error::MappingError;
use crate::schema::descriptor::{Entity, EntityDescriptor};
use crate::schema::value::Row;

/// Builds one entity from a row by assigning every descriptor field.
///
/// Extra columns in the row are ignored. The row is not retained.
pub fn materialize<T: Default>(
    row: &Row,
    descriptor: &EntityDescriptor<T>,
) -> Result<T, MappingError> {
    let mut instance = T::default();

    for field in descriptor.fields() {
        let value = row
            .get(field.name())
            .ok_or_else(|| MappingError::MissingColumn {
                entity: descriptor.type_name().to_string(),
                column: field.name().to_string(),
            })?;

        field.write(&mut instance, value)?;
    }

    Ok(instance)
}

/// Materializes every row through the entity's row hook.
///
/// Stops at the first row that fails.
pub fn materialize_all<T: Entity>(
    rows: &[Row],
    descriptor: &EntityDescriptor<T>,
) -> Result<Vec<T>, MappingError> {
    rows.iter().map(|row| T::from_row(row, descriptor)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::schema::value::SemanticType;
    use orderdesk_core::{Client, Product};

    fn client_row() -> Row {
        Row::new()
            .with("idClient", 4)
            .with("name", "Ana")
            .with("address", "Main St")
            .with("email", "ana@x.com")
            .with("age", 30)
    }

    #[test]
    fn test_materialize_client() {
        let descriptor = EntityDescriptor::<Client>::of().unwrap();
        let client = materialize(&client_row(), &descriptor).unwrap();

        assert_eq!(
            client,
            Client {
                id: 4,
                name: "Ana".into(),
                address: "Main St".into(),
                email: "ana@x.com".into(),
                age: 30,
            }
        );
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let descriptor = EntityDescriptor::<Client>::of().unwrap();
        let row = client_row().with("loyalty_points", 12);

        assert!(materialize(&row, &descriptor).is_ok());
    }

    #[test]
    fn test_missing_column() {
        let descriptor = EntityDescriptor::<Client>::of().unwrap();
        let row = Row::new().with("idClient", 1).with("name", "Ana");

        let err = materialize(&row, &descriptor).unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingColumn {
                entity: "Client".into(),
                column: "address".into(),
            }
        );
    }

    #[test]
    fn test_uncoercible_value() {
        let descriptor = EntityDescriptor::<Product>::of().unwrap();
        let row = Row::new()
            .with("idProduct", 1)
            .with("name", "Widget")
            .with("quantity", "ten")
            .with("price", 5.0);

        let err = materialize(&row, &descriptor).unwrap_err();
        assert_eq!(
            err,
            MappingError::TypeMismatch {
                column: "quantity".into(),
                expected: SemanticType::Int,
                found: "TEXT".into(),
            }
        );
    }

    #[test]
    fn test_integer_price_widens() {
        let descriptor = EntityDescriptor::<Product>::of().unwrap();
        let row = Row::new()
            .with("idProduct", 1)
            .with("name", "Widget")
            .with("quantity", 10)
            .with("price", 5);

        let product = materialize(&row, &descriptor).unwrap();
        assert_eq!(product.price, 5.0);
        assert_eq!(product.stock, 10);
    }

    #[test]
    fn test_materialize_all_aborts_on_bad_row() {
        let descriptor = EntityDescriptor::<Client>::of().unwrap();
        let rows = vec![client_row(), Row::new().with("idClient", 2)];

        assert!(materialize_all(&rows, &descriptor).is_err());
        assert_eq!(materialize_all(&rows[..1], &descriptor).unwrap().len(), 1);
    }
}
