//! # Client Service
//!
//! Validated client management.

use tracing::info;

use crate::repository::ClientRepository;
use crate::service::ServiceResult;
use orderdesk_core::validation::validate_client;
use orderdesk_core::{Client, CoreError};

#[derive(Debug, Clone)]
pub struct ClientService {
    clients: ClientRepository,
}

impl ClientService {
    pub fn new(clients: ClientRepository) -> Self {
        ClientService { clients }
    }

    /// Gets a client or fails with `CoreError::ClientNotFound`.
    pub async fn find_client(&self, id: i64) -> ServiceResult<Client> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ClientNotFound(id).into())
    }

    pub async fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.clients.find_all().await?)
    }

    /// Validates and inserts a client, returning it with its new id.
    pub async fn add_client(&self, client: Client) -> ServiceResult<Client> {
        validate_client(&client)?;

        let client = self.clients.insert(client).await?;
        info!(id = client.id, "Client added");
        Ok(client)
    }

    /// Validates and stores a client's fields.
    ///
    /// Like the repository update, an unknown id changes nothing.
    pub async fn update_client(&self, client: Client) -> ServiceResult<Client> {
        validate_client(&client)?;
        Ok(self.clients.update(client).await?)
    }

    /// Deletes a client and, by cascade, its orders.
    ///
    /// Returns `false` when no client had that id.
    pub async fn delete_client(&self, id: i64) -> ServiceResult<bool> {
        let deleted = self.clients.delete(id).await? > 0;
        if deleted {
            info!(id = id, "Client deleted");
        }
        Ok(deleted)
    }
}
