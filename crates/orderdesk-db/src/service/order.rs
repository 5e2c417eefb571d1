//! # Order Service
//!
//! Places orders: the stock check, the order row and the stock decrement
//! commit together or not at all.
//!
//! ## create_order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  validate_quantity(qty)                    ── ValidationError          │
//! │       │                                                                 │
//! │  BEGIN IMMEDIATE                           ── write lock up front      │
//! │       │                                                                 │
//! │  client  = find_by_id(client_id)           ── ClientNotFound           │
//! │  product = find_by_id(product_id)          ── ProductNotFound          │
//! │  check_stock_availability(product, qty)    ── InsufficientStock        │
//! │       │                                                                 │
//! │  INSERT INTO Orders (.., totalprice = price × qty)                     │
//! │  UPDATE Product SET quantity = quantity - qty                          │
//! │       │                                                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction, which rolls back.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::{ClientRepository, OrderRepository, ProductRepository};
use crate::service::ServiceResult;
use orderdesk_core::validation::{check_stock_availability, validate_quantity};
use orderdesk_core::{CoreError, Order};

#[derive(Debug, Clone)]
pub struct OrderService {
    pool: SqlitePool,
    clients: ClientRepository,
    products: ProductRepository,
    orders: OrderRepository,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(OrderService {
            clients: ClientRepository::new(pool.clone())?,
            products: ProductRepository::new(pool.clone())?,
            orders: OrderRepository::new(pool.clone())?,
            pool,
        })
    }

    /// Places an order for `quantity` units and takes them from stock.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The stored order, with its id and total price
    /// * `Err(Core(Validation))` - Quantity out of range
    /// * `Err(Core(ClientNotFound | ProductNotFound))`
    /// * `Err(Core(InsufficientStock))` - Nothing was written
    pub async fn create_order(
        &self,
        client_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> ServiceResult<Order> {
        validate_quantity(quantity)?;

        // A deferred BEGIN would read first and then fail with SQLITE_BUSY
        // when upgrading to a write lock held by a concurrent order.
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(DbError::from)?;

        if self
            .clients
            .find_by_id_on(&mut *tx, client_id, self.clients.descriptor().table_name())
            .await?
            .is_none()
        {
            return Err(CoreError::ClientNotFound(client_id).into());
        }

        let product = self
            .products
            .find_by_id_on(&mut *tx, product_id, self.products.descriptor().table_name())
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        if let Err(e) = check_stock_availability(&product, quantity) {
            warn!(
                product_id = product_id,
                available = product.stock,
                requested = quantity,
                "Under-stock: order not placed"
            );
            return Err(e.into());
        }

        let mut order = Order::new(client_id, product_id, quantity);
        order.total_price = product.total_for(quantity);

        let order = self.orders.insert_on(&mut *tx, order).await?;
        self.products
            .update_stock_on(&mut *tx, product_id, -quantity)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            id = order.id,
            client_id = client_id,
            product_id = product_id,
            quantity = quantity,
            total = order.total_price,
            "Order placed"
        );
        Ok(order)
    }

    pub async fn list_orders(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    pub async fn orders_for_client(&self, client_id: i64) -> ServiceResult<Vec<Order>> {
        Ok(self.orders.find_by_client(client_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::service::ServiceError;
    use orderdesk_core::{Client, Product};

    struct Fixture {
        db: Database,
        client_id: i64,
        product_id: i64,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = db
            .clients()
            .unwrap()
            .insert(Client::new("Ana", "Main St", "ana@x.com", 30))
            .await
            .unwrap();
        let product = db
            .products()
            .unwrap()
            .insert(Product::new("Widget", 10, 5.0))
            .await
            .unwrap();

        Fixture {
            db,
            client_id: client.id,
            product_id: product.id,
        }
    }

    async fn stock(f: &Fixture) -> i64 {
        f.db.products()
            .unwrap()
            .find_by_id(f.product_id)
            .await
            .unwrap()
            .unwrap()
            .stock
    }

    #[tokio::test]
    async fn test_order_takes_stock() {
        let f = fixture().await;
        let service = f.db.order_service().unwrap();

        let order = service
            .create_order(f.client_id, f.product_id, 3)
            .await
            .unwrap();

        assert!(order.id > 0);
        assert_eq!(order.total_price, 15.0);
        assert_eq!(stock(&f).await, 7);
        assert_eq!(service.list_orders().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_under_stock_writes_nothing() {
        let f = fixture().await;
        let service = f.db.order_service().unwrap();

        let err = service
            .create_order(f.client_id, f.product_id, 100)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Core(CoreError::InsufficientStock {
                available: 10,
                requested: 100,
                ..
            })
        ));
        assert_eq!(stock(&f).await, 10);
        assert!(service.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exact_stock_then_empty() {
        let f = fixture().await;
        let service = f.db.order_service().unwrap();

        service
            .create_order(f.client_id, f.product_id, 10)
            .await
            .unwrap();
        assert_eq!(stock(&f).await, 0);

        assert!(service
            .create_order(f.client_id, f.product_id, 1)
            .await
            .is_err());
        assert_eq!(service.orders_for_client(f.client_id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_orders_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("orders.db")).max_connections(8))
            .await
            .unwrap();

        let client = db
            .clients()
            .unwrap()
            .insert(Client::new("Ana", "Main St", "ana@x.com", 30))
            .await
            .unwrap();
        let product = db
            .products()
            .unwrap()
            .insert(Product::new("Widget", 100, 5.0))
            .await
            .unwrap();

        let (client_id, product_id) = (client.id, product.id);
        let service = db.order_service().unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create_order(client_id, product_id, 1).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stock = db
            .products()
            .unwrap()
            .find_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .stock;
        assert_eq!(stock, 92);
        assert_eq!(service.list_orders().await.unwrap().len(), 8);

        db.close().await;
    }

    #[tokio::test]
    async fn test_unknown_parties_and_bad_quantity() {
        let f = fixture().await;
        let service = f.db.order_service().unwrap();

        let err = service.create_order(999, f.product_id, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::ClientNotFound(999))));

        let err = service.create_order(f.client_id, 999, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::ProductNotFound(999))));

        let err = service
            .create_order(f.client_id, f.product_id, 0)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        assert_eq!(stock(&f).await, 10);
        assert!(service.list_orders().await.unwrap().is_empty());
    }
}
