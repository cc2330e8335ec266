//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::products::{
    models::{NewProduct, Product, ProductUpdate, ProductUuid},
    repository::ProductsRepository,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryProductsService {
    repository: Arc<ProductsRepository>,
}

impl MemoryProductsService {
    #[must_use]
    pub fn new(repository: Arc<ProductsRepository>) -> Self {
        Self { repository }
    }

    #[must_use]
    pub fn repository(&self) -> &Arc<ProductsRepository> {
        &self.repository
    }
}

#[async_trait]
impl ProductsService for MemoryProductsService {
    async fn list_products(&self) -> Vec<Product> {
        self.repository.list_products().await
    }

    async fn get_product(&self, product: ProductUuid) -> Option<Product> {
        self.repository.get_product(product).await
    }

    async fn create_product(&self, product: NewProduct) -> Product {
        let created = self.repository.create_product(product).await;

        debug!(product = %created.uuid, seller = %created.seller, "product created");

        created
    }

    async fn update_product(&self, product: ProductUuid, update: ProductUpdate) -> Option<Product> {
        let updated = self.repository.update_product(product, update).await;

        debug!(%product, found = updated.is_some(), "product update");

        updated
    }

    async fn delete_product(&self, product: ProductUuid) -> bool {
        let deleted = self.repository.delete_product(product).await;

        debug!(%product, deleted, "product delete");

        deleted
    }

    async fn list_products_by_seller(&self, seller: &str) -> Vec<Product> {
        self.repository.list_products_by_seller(seller).await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Vec<Product>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Option<Product>;

    /// Stores a new product under a fresh UUID, ahead of every existing one.
    async fn create_product(&self, product: NewProduct) -> Product;

    /// Merges the set fields of `update` into the product, keeping its
    /// position. `None` when no such product exists.
    async fn update_product(&self, product: ProductUuid, update: ProductUpdate) -> Option<Product>;

    /// Deletes a product, reporting whether anything was removed.
    async fn delete_product(&self, product: ProductUuid) -> bool;

    /// Products whose seller name equals `seller` exactly.
    async fn list_products_by_seller(&self, seller: &str) -> Vec<Product>;
}
