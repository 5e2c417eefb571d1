//! # Product Service
//!
//! Validated product management and stock checks.

use tracing::info;

use crate::repository::ProductRepository;
use crate::service::ServiceResult;
use orderdesk_core::validation::{check_stock_availability, validate_product};
use orderdesk_core::{CoreError, Product};

#[derive(Debug, Clone)]
pub struct ProductService {
    products: ProductRepository,
}

impl ProductService {
    pub fn new(products: ProductRepository) -> Self {
        ProductService { products }
    }

    /// Gets a product or fails with `CoreError::ProductNotFound`.
    pub async fn get_product(&self, id: i64) -> ServiceResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.products.find_all().await?)
    }

    pub async fn add_product(&self, product: Product) -> ServiceResult<Product> {
        validate_product(&product)?;

        let product = self.products.insert(product).await?;
        info!(id = product.id, name = %product.name, "Product added");
        Ok(product)
    }

    pub async fn edit_product(&self, product: Product) -> ServiceResult<Product> {
        validate_product(&product)?;
        Ok(self.products.update(product).await?)
    }

    /// Deletes a product and, by cascade, the orders for it.
    pub async fn delete_product(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.products.delete(id).await? > 0)
    }

    /// Reads the current stock of `id` and checks it covers `quantity`.
    pub async fn check_stock_availability(&self, id: i64, quantity: i64) -> ServiceResult<()> {
        let product = self.get_product(id).await?;
        check_stock_availability(&product, quantity)?;
        Ok(())
    }

    /// Adds units to stock.
    pub async fn restock(&self, id: i64, units: i64) -> ServiceResult<Product> {
        self.products.update_stock(id, units).await?;
        self.get_product(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn service() -> (Database, ProductService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = db.product_service().unwrap();
        (db, service)
    }

    #[tokio::test]
    async fn test_add_edit_delete() {
        let (_db, service) = service().await;

        let mut widget = service
            .add_product(Product::new("Widget", 10, 5.0))
            .await
            .unwrap();
        widget.price = 6.5;
        service.edit_product(widget.clone()).await.unwrap();
        assert_eq!(service.get_product(widget.id).await.unwrap().price, 6.5);

        assert!(service.delete_product(widget.id).await.unwrap());
        assert!(service.list_products().await.unwrap().is_empty());
        assert_eq!(
            service.get_product(widget.id).await.unwrap_err().code(),
            "NOT_FOUND"
        );
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let (_db, service) = service().await;

        let err = service
            .add_product(Product::new("Widget", 10, -1.0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_stock_check_and_restock() {
        let (_db, service) = service().await;
        let widget = service
            .add_product(Product::new("Widget", 10, 5.0))
            .await
            .unwrap();

        assert!(service.check_stock_availability(widget.id, 10).await.is_ok());
        let err = service
            .check_stock_availability(widget.id, 11)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_STOCK");

        let restocked = service.restock(widget.id, 5).await.unwrap();
        assert_eq!(restocked.stock, 15);
    }
}
