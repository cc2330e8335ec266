//! Products Repository

use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::{
    ids::{IdGenerator, TimeOrderedIds},
    products::models::{NewProduct, Product, ProductUpdate, ProductUuid},
};

/// Insertion ordered product collection, newest first.
#[derive(Debug)]
pub struct ProductsRepository {
    products: RwLock<Vec<Product>>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for ProductsRepository {
    fn default() -> Self {
        Self::new(Arc::new(TimeOrderedIds))
    }
}

impl ProductsRepository {
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            ids,
        }
    }

    /// Append products after the existing ones, keeping the given order.
    pub async fn seed(&self, products: impl IntoIterator<Item = NewProduct>) {
        let now = Timestamp::now();
        let seeded: Vec<Product> = products
            .into_iter()
            .map(|product| self.build(product, now))
            .collect();

        self.products.write().await.extend(seeded);
    }

    pub async fn list_products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn get_product(&self, product: ProductUuid) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.uuid == product)
            .cloned()
    }

    pub async fn create_product(&self, product: NewProduct) -> Product {
        let created = self.build(product, Timestamp::now());

        self.products.write().await.insert(0, created.clone());

        created
    }

    pub async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Option<Product> {
        let mut products = self.products.write().await;
        let existing = products.iter_mut().find(|p| p.uuid == product)?;

        existing.apply(update);
        existing.updated_at = Timestamp::now();

        Some(existing.clone())
    }

    pub async fn delete_product(&self, product: ProductUuid) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();

        products.retain(|p| p.uuid != product);

        products.len() < before
    }

    pub async fn list_products_by_seller(&self, seller: &str) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|p| p.seller == seller)
            .cloned()
            .collect()
    }

    fn build(&self, product: NewProduct, now: Timestamp) -> Product {
        Product {
            uuid: ProductUuid::from_uuid(self.ids.next_uuid()),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            seller: product.seller,
            image: product.image,
            is_active: product.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
