//! # Product Repository
//!
//! Generic CRUD for products plus stock adjustment.
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                            │
//! │                                                                     │
//! │  Absolute (read, compute, write back the whole row):               │
//! │     UPDATE Product SET name = ?, quantity = 7, price = ? ...       │
//! │                                                                     │
//! │  Delta (what update_stock does):                                   │
//! │     UPDATE Product SET quantity = quantity + ? WHERE idProduct = ? │
//! │                                                                     │
//! │  Two orders for 3 and 2 units both apply: 10 - 3 - 2 = 5.          │
//! │  The CHECK (quantity >= 0) constraint rejects an oversell.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::ops::Deref;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generic::GenericRepository;
use orderdesk_core::Product;

/// Repository for products.
///
/// Dereferences to [`GenericRepository<Product>`] for the CRUD operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products()?;
///
/// let widget = repo.insert(Product::new("Widget", 10, 5.0)).await?;
/// repo.update_stock(widget.id, -3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    inner: GenericRepository<Product>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> DbResult<Self> {
        Ok(ProductRepository {
            inner: GenericRepository::new(pool)?,
        })
    }

    /// Gets the first product with exactly this name.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let products = self.inner.find_by_field("name", name).await?;
        Ok(products.into_iter().next())
    }

    /// Adds `delta` to a product's stock (negative for orders).
    ///
    /// ## Returns
    /// * `Ok(())` - Stock changed
    /// * `Err(DbError::NotFound)` - No product with that id
    /// * `Err(DbError::CheckViolation)` - Stock would go negative
    pub async fn update_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        let mut conn = self.inner.pool().acquire().await?;
        self.update_stock_on(&mut conn, id, delta).await
    }

    pub async fn update_stock_on(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        delta: i64,
    ) -> DbResult<()> {
        debug!(id = id, delta = delta, "Updating stock");

        let result = sqlx::query(
            r#"
            UPDATE Product
            SET quantity = quantity + ?1
            WHERE idProduct = ?2
            "#,
        )
        .bind(delta)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

impl Deref for ProductRepository {
    type Target = GenericRepository<Product>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products().unwrap();
        (db, repo)
    }

    #[tokio::test]
    async fn test_insert_and_find_by_name() {
        let (_db, repo) = repo().await;
        let widget = repo.insert(Product::new("Widget", 10, 5.0)).await.unwrap();

        let found = repo.find_by_name("Widget").await.unwrap().unwrap();
        assert_eq!(found, widget);
        assert_eq!(found.stock, 10);
        assert_eq!(found.price, 5.0);

        assert!(repo.find_by_name("Gizmo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_stock_delta() {
        let (_db, repo) = repo().await;
        let widget = repo.insert(Product::new("Widget", 10, 5.0)).await.unwrap();

        repo.update_stock(widget.id, -3).await.unwrap();
        repo.update_stock(widget.id, 5).await.unwrap();

        let found = repo.find_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(found.stock, 12);
    }

    #[tokio::test]
    async fn test_update_stock_rejects_oversell() {
        let (_db, repo) = repo().await;
        let widget = repo.insert(Product::new("Widget", 2, 5.0)).await.unwrap();

        let err = repo.update_stock(widget.id, -3).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        let found = repo.find_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(found.stock, 2);
    }

    #[tokio::test]
    async fn test_update_stock_missing_product() {
        let (_db, repo) = repo().await;

        let err = repo.update_stock(404, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
