//! # orderdesk-core: Pure Domain Logic for Orderdesk
//!
//! Entity types and business rules with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderdesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Services (orderdesk-db::service)                │   │
//! │  │    add_client, add_product, create_order, list_orders, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌────────────┐               │   │
//! │  │   │   types   │  │  validation  │  │   error    │               │   │
//! │  │   │  Client   │  │ email, age   │  │ CoreError  │               │   │
//! │  │   │  Product  │  │ stock, price │  │ Validation │               │   │
//! │  │   │  Order    │  │ quantity     │  │  Error     │               │   │
//! │  │   └───────────┘  └──────────────┘  └────────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orderdesk-db (Persistence Layer)                │   │
//! │  │        descriptors, generic repository, SQLite migrations       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Product, Order)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::{validation, Product};
//!
//! let widget = Product::new("Widget", 10, 5.0);
//! assert!(validation::check_stock_availability(&widget, 3).is_ok());
//! assert!(validation::check_stock_availability(&widget, 100).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Identity value of an entity that has not been stored yet.
///
/// The database assigns the real id on insert; until then every entity
/// carries this placeholder.
pub const UNASSIGNED_ID: i64 = 0;

/// Maximum quantity of a single product in one order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ORDER_QUANTITY: i64 = 999;

/// Oldest age accepted for a client record.
pub const MAX_CLIENT_AGE: i64 = 150;
