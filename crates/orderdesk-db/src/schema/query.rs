//! # Statement Synthesis
//!
//! Builds the SQL text for every generic repository operation from a
//! descriptor. Values are never spliced into the text: each one is a
//! positional `?` bound in field order.
//!
//! ## Statements for `Client`
//! ```text
//! ┌───────────────┬────────────────────────────────────────────────────────┐
//! │ select all    │ SELECT * FROM Client                                   │
//! │ select by id  │ SELECT * FROM Client WHERE idClient = ?                │
//! │ insert        │ INSERT INTO Client (name, address, email, age)         │
//! │               │   VALUES (?, ?, ?, ?)                                  │
//! │ update        │ UPDATE Client SET name = ?, address = ?, email = ?,    │
//! │               │   age = ? WHERE idClient = ?                           │
//! │ delete        │ DELETE FROM Client WHERE idClient = ?                  │
//! └───────────────┴────────────────────────────────────────────────────────┘
//! ```
//!
//! Table and column names come from descriptors and are written as-is.

use super::descriptor::{EntityDescriptor, FieldSpec};

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn column_list<'a, T: 'a>(fields: impl Iterator<Item = &'a FieldSpec<T>>) -> String {
    fields.map(|f| f.name()).collect::<Vec<_>>().join(", ")
}

/// `SELECT * FROM <table>`
pub fn build_select_all(table: &str) -> String {
    format!("SELECT * FROM {}", table)
}

/// `SELECT * FROM <table> WHERE <column> = ?`
pub fn build_select_by_field(table: &str, column: &str) -> String {
    format!("SELECT * FROM {} WHERE {} = ?", table, column)
}

/// INSERT naming every persistent field, identity included.
pub fn build_insert<T>(descriptor: &EntityDescriptor<T>) -> String {
    let fields = descriptor.fields();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        descriptor.table_name(),
        column_list(fields.iter()),
        placeholders(fields.len())
    )
}

/// INSERT leaving the identity column to the store.
pub fn build_insert_generated<T>(descriptor: &EntityDescriptor<T>) -> String {
    let count = descriptor.non_id_fields().count();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        descriptor.table_name(),
        column_list(descriptor.non_id_fields()),
        placeholders(count)
    )
}

/// UPDATE assigning every non-identity field, keyed by the identity.
///
/// Bind order: non-identity values in declaration order, then the id.
pub fn build_update<T>(descriptor: &EntityDescriptor<T>) -> String {
    let assignments = descriptor
        .non_id_fields()
        .map(|f| format!("{} = ?", f.name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        descriptor.table_name(),
        assignments,
        descriptor.id_column()
    )
}

/// `DELETE FROM <table> WHERE <id> = ?`
pub fn build_delete<T>(descriptor: &EntityDescriptor<T>) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?",
        descriptor.table_name(),
        descriptor.id_column()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::{Client, Order, Product};

    #[test]
    fn test_select_statements() {
        assert_eq!(build_select_all("Client"), "SELECT * FROM Client");
        assert_eq!(
            build_select_by_field("Client", "idClient"),
            "SELECT * FROM Client WHERE idClient = ?"
        );
        assert_eq!(
            build_select_by_field("Client", "email"),
            "SELECT * FROM Client WHERE email = ?"
        );
    }

    #[test]
    fn test_client_insert_statements() {
        let descriptor = EntityDescriptor::<Client>::of().unwrap();

        assert_eq!(
            build_insert(&descriptor),
            "INSERT INTO Client (idClient, name, address, email, age) VALUES (?, ?, ?, ?, ?)"
        );
        assert_eq!(
            build_insert_generated(&descriptor),
            "INSERT INTO Client (name, address, email, age) VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_update_excludes_identity_from_set() {
        let descriptor = EntityDescriptor::<Product>::of().unwrap();

        assert_eq!(
            build_update(&descriptor),
            "UPDATE Product SET name = ?, quantity = ?, price = ? WHERE idProduct = ?"
        );
    }

    #[test]
    fn test_order_uses_table_override() {
        let descriptor = EntityDescriptor::<Order>::of().unwrap();

        assert_eq!(
            build_insert_generated(&descriptor),
            "INSERT INTO Orders (idclient, idproduct, quantity, totalprice) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(
            build_delete(&descriptor),
            "DELETE FROM Orders WHERE idorder = ?"
        );
    }
}
