//! # Repository Module
//!
//! Database repository implementations for Orderdesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Service / binary                                                      │
//! │       │                                                                 │
//! │       │  db.products()?.update_stock(id, -3)                           │
//! │       ▼                                                                 │
//! │  ProductRepository ─────── Deref ───────► GenericRepository<Product>   │
//! │  └── find_by_name                         ├── find_all                 │
//! │  └── update_stock                         ├── find_by_id               │
//! │                                           ├── insert / insert_with_id  │
//! │                                           ├── update                   │
//! │                                           └── delete                   │
//! │       │                                                                 │
//! │       │  SQL synthesized from EntityDescriptor<Product>                │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`GenericRepository`] - CRUD for any `Entity`
//! - [`ClientRepository`] - Clients, lookup by email
//! - [`ProductRepository`] - Products, lookup by name, stock deltas
//! - [`OrderRepository`] - Orders, lookup by client

pub mod client;
pub mod generic;
pub mod order;
pub mod product;

pub use client::ClientRepository;
pub use generic::{GenericRepository, Listing};
pub use order::OrderRepository;
pub use product::ProductRepository;
