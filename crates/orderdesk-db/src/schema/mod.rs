//! # Schema Module
//!
//! Everything the generic repository needs to know about a persistent
//! type, without reflection.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  impl Entity for Client  (entities.rs)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EntityDescriptor<Client>  (descriptor.rs)                             │
//! │       │                                                                 │
//! │       ├──► query.rs        SQL text per operation                      │
//! │       ├──► value.rs        Value binding, Row reading                  │
//! │       ├──► materialize.rs  Row → Client                                │
//! │       └──► table.rs        [Client] → headers + cells                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod descriptor;
pub mod entities;
pub mod materialize;
pub mod query;
pub mod table;
pub mod value;

pub use descriptor::{Entity, EntityDescriptor, FieldAccess, FieldSpec};
pub use materialize::{materialize, materialize_all};
pub use table::Tabulation;
pub use value::{Row, SemanticType, Value};
