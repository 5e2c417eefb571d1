//! # Client Repository
//!
//! Generic CRUD for clients plus lookup by email.

use std::ops::Deref;

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::repository::generic::GenericRepository;
use orderdesk_core::Client;

/// Repository for clients.
///
/// Dereferences to [`GenericRepository<Client>`].
#[derive(Debug, Clone)]
pub struct ClientRepository {
    inner: GenericRepository<Client>,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(ClientRepository {
            inner: GenericRepository::new(pool)?,
        })
    }

    /// Gets the client registered under `email`.
    ///
    /// Emails are compared exactly; the schema keeps them unique.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Client>> {
        let mut clients = self.inner.find_by_field("email", email).await?;
        Ok(clients.pop())
    }
}

impl Deref for ClientRepository {
    type Target = GenericRepository<Client>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
