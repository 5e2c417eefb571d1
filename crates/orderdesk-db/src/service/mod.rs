//! # Service Layer
//!
//! Business operations over the repositories: validation before writes,
//! not-found reporting, and the order workflow.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ClientService::add_client(client)                                     │
//! │       │                                                                 │
//! │       ├── validate_client ──── ValidationError ──┐                     │
//! │       │                                          ▼                      │
//! │       │                             CoreError::Validation ──┐          │
//! │       ▼                                                     ▼          │
//! │  ClientRepository::insert ──── DbError ──────────────► ServiceError    │
//! │                                                             │          │
//! │                                                             ▼          │
//! │                                               code(): "VALIDATION_ERROR"│
//! │                                                       "NOT_FOUND" ...  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod order;
pub mod product;

pub use client::ClientService;
pub use order::OrderService;
pub use product::ProductService;

use thiserror::Error;

use crate::error::DbError;
use orderdesk_core::{CoreError, ValidationError};

/// Errors returned by services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

impl ServiceError {
    /// Machine-readable category for front ends.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Core(CoreError::ClientNotFound(_))
            | ServiceError::Core(CoreError::ProductNotFound(_))
            | ServiceError::Db(DbError::NotFound { .. }) => "NOT_FOUND",
            ServiceError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            ServiceError::Core(CoreError::InsufficientStock { .. }) => "INSUFFICIENT_STOCK",
            ServiceError::Db(DbError::UniqueViolation { .. })
            | ServiceError::Db(DbError::ForeignKeyViolation { .. })
            | ServiceError::Db(DbError::CheckViolation { .. }) => "CONSTRAINT_VIOLATION",
            ServiceError::Db(_) => "DATABASE_ERROR",
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
