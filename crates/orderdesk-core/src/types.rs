//! # Domain Types
//!
//! The three entities the operator manages.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │   │  id (store)     │   │  id (store)     │       │
//! │  │  name           │   │  name           │   │  client_id (FK) │       │
//! │  │  address        │   │  stock          │   │  product_id(FK) │       │
//! │  │  email          │   │  price          │   │  quantity       │       │
//! │  │  age            │   │                 │   │  total_price    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are assigned by the database on insert. A freshly built entity holds
//! [`UNASSIGNED_ID`](crate::UNASSIGNED_ID) until the insert returns.
//!
//! Every type implements `Default`: the persistence layer starts from the
//! default value and fills fields in one by one when reading rows.

use serde::{Deserialize, Serialize};

use crate::UNASSIGNED_ID;

// =============================================================================
// Client
// =============================================================================

/// A customer who places orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned identifier.
    pub id: i64,

    /// Full name.
    pub name: String,

    /// Postal address.
    pub address: String,

    /// Contact email, validated on add/update.
    pub email: String,

    /// Age in years.
    pub age: i64,
}

impl Client {
    /// Creates a client that has not been stored yet.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        age: i64,
    ) -> Self {
        Client {
            id: UNASSIGNED_ID,
            name: name.into(),
            address: address.into(),
            email: email.into(),
            age,
        }
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Client [id={}, name={}, address={}, email={}, age={}]",
            self.id, self.name, self.address, self.email, self.age
        )
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product kept in stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Units currently in stock.
    pub stock: i64,

    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Creates a product that has not been stored yet.
    pub fn new(name: impl Into<String>, stock: i64, price: f64) -> Self {
        Product {
            id: UNASSIGNED_ID,
            name: name.into(),
            stock,
            price,
        }
    }

    /// Checks if `quantity` units can be taken from stock.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Price of `quantity` units.
    pub fn total_for(&self, quantity: i64) -> f64 {
        self.price * quantity as f64
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order of one product by one client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier.
    pub id: i64,

    /// Ordering client.
    pub client_id: i64,

    /// Ordered product.
    pub product_id: i64,

    /// Number of units.
    pub quantity: i64,

    /// Price of the whole order, frozen when the order is placed.
    pub total_price: f64,
}

impl Order {
    /// Creates an order that has not been stored yet.
    pub fn new(client_id: i64, product_id: i64, quantity: i64) -> Self {
        Order {
            id: UNASSIGNED_ID,
            client_id,
            product_id,
            quantity,
            total_price: 0.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
