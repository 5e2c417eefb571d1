//! # Order Repository
//!
//! Generic CRUD for orders plus lookup by client. Orders are placed
//! through `OrderService`, which also moves stock; inserting here directly
//! does not touch the product.

use std::ops::Deref;

use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::repository::generic::GenericRepository;
use orderdesk_core::Order;

/// Repository for orders (table `Orders`).
#[derive(Debug, Clone)]
pub struct OrderRepository {
    inner: GenericRepository<Order>,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(OrderRepository {
            inner: GenericRepository::new(pool)?,
        })
    }

    /// Lists the orders placed by a client, in ascending id order.
    pub async fn find_by_client(&self, client_id: i64) -> DbResult<Vec<Order>> {
        let mut orders = self.inner.find_by_field("idclient", client_id).await?;
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }
}

impl Deref for OrderRepository {
    type Target = GenericRepository<Order>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use orderdesk_core::{Client, Product};

    #[tokio::test]
    async fn test_find_by_client_and_cascade() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ana = db
            .clients()
            .unwrap()
            .insert(Client::new("Ana", "Main St", "ana@x.com", 30))
            .await
            .unwrap();
        let widget = db
            .products()
            .unwrap()
            .insert(Product::new("Widget", 10, 5.0))
            .await
            .unwrap();

        let orders = db.orders().unwrap();
        let mut order = Order::new(ana.id, widget.id, 2);
        order.total_price = 10.0;
        let order = orders.insert(order).await.unwrap();

        assert_eq!(orders.find_by_client(ana.id).await.unwrap(), vec![order]);
        assert!(orders.find_by_client(ana.id + 1).await.unwrap().is_empty());

        db.clients().unwrap().delete(ana.id).await.unwrap();
        assert!(orders.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_client_sorted_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ana = db
            .clients()
            .unwrap()
            .insert(Client::new("Ana", "Main St", "ana@x.com", 30))
            .await
            .unwrap();
        let widget = db
            .products()
            .unwrap()
            .insert(Product::new("Widget", 10, 5.0))
            .await
            .unwrap();

        let orders = db.orders().unwrap();
        for id in [50, 10, 30] {
            let mut order = Order::new(ana.id, widget.id, 1);
            order.id = id;
            orders.insert_with_id(order).await.unwrap();
        }

        let ids: Vec<i64> = orders
            .find_by_client(ana.id)
            .await
            .unwrap()
            .iter()
            .map(|order| order.id)
            .collect();
        assert_eq!(ids, vec![10, 30, 50]);
    }

    #[tokio::test]
    async fn test_unknown_client_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .orders()
            .unwrap()
            .insert(Order::new(1, 1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
