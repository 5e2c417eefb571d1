//! # orderdesk-db: Persistence Layer for Orderdesk
//!
//! A descriptor-driven repository over SQLite: SQL text is synthesized
//! from each entity's field table and rows are turned back into typed
//! values without per-entity query code.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderdesk Data Flow                              │
//! │                                                                         │
//! │  Front end / seed binary                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   orderdesk-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   service ──────► repository ──────► schema                    │   │
//! │  │   ClientService   GenericRepository  EntityDescriptor          │   │
//! │  │   ProductService  ClientRepository   query synthesis           │   │
//! │  │   OrderService    ProductRepository  Row / Value               │   │
//! │  │                   OrderRepository    materialize               │   │
//! │  │                        │                                        │   │
//! │  │                        ▼                                        │   │
//! │  │   pool (Database, DbConfig)   migrations   config              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: Client, Product, Orders                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Schema, mapping and data access errors
//! - [`schema`] - Entity descriptors, statement synthesis, row mapping
//! - [`repository`] - Generic and per-entity repositories
//! - [`service`] - Validated business operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderdesk_db::{Database, DbConfig};
//! use orderdesk_core::{Client, Product};
//!
//! let db = Database::new(DbConfig::new("orderdesk.db")).await?;
//!
//! let ana = db.client_service()?
//!     .add_client(Client::new("Ana", "Main St", "ana@x.com", 30))
//!     .await?;
//! let widget = db.product_service()?
//!     .add_product(Product::new("Widget", 10, 5.0))
//!     .await?;
//!
//! let order = db.order_service()?.create_order(ana.id, widget.id, 3).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;
pub use error::{DbError, DbResult, MappingError, SchemaError};
pub use pool::{Database, DbConfig};

pub use repository::{
    ClientRepository, GenericRepository, Listing, OrderRepository, ProductRepository,
};
pub use schema::{Entity, EntityDescriptor, FieldSpec, Row, SemanticType, Tabulation, Value};
pub use service::{ClientService, OrderService, ProductService, ServiceError, ServiceResult};
