//! Catalogue Context
//!
//! Wires the session and product services together for the flows that need
//! both: attributing new products to the signed in user and restricting edits
//! to the seller.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    ids::{IdGenerator, TimeOrderedIds},
    products::{
        MemoryProductsService, ProductDraft, ProductFilter, ProductInputError, ProductsRepository,
        ProductsService,
        models::{Product, ProductUuid},
    },
    session::{KeyValueStore, SessionConfig, SessionError, SessionService, SessionStore},
    users::{PublicProfile, UsersRepository},
};

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("no user is signed in")]
    NotAuthenticated,

    #[error("product not found")]
    NotFound,

    #[error("product belongs to another seller")]
    NotOwner,

    #[error("invalid product")]
    Input(#[from] ProductInputError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone)]
pub struct CatalogueContext {
    pub session: Arc<dyn SessionService>,
    pub products: Arc<dyn ProductsService>,
}

impl fmt::Debug for CatalogueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogueContext").finish_non_exhaustive()
    }
}

/// Repositories and store built by [`CatalogueContext::in_memory`].
#[derive(Debug)]
pub struct InMemoryParts {
    pub context: CatalogueContext,
    pub users: Arc<UsersRepository>,
    pub products: Arc<ProductsRepository>,
}

impl CatalogueContext {
    #[must_use]
    pub fn new(session: Arc<dyn SessionService>, products: Arc<dyn ProductsService>) -> Self {
        Self { session, products }
    }

    /// Build the in-memory user list and product collection around `storage`.
    pub fn in_memory(storage: Arc<dyn KeyValueStore>, config: SessionConfig) -> InMemoryParts {
        Self::in_memory_with_ids(storage, config, Arc::new(TimeOrderedIds))
    }

    /// Like [`CatalogueContext::in_memory`] with an explicit id source.
    pub fn in_memory_with_ids(
        storage: Arc<dyn KeyValueStore>,
        config: SessionConfig,
        ids: Arc<dyn IdGenerator>,
    ) -> InMemoryParts {
        let users = Arc::new(UsersRepository::new(ids.clone()));
        let products = Arc::new(ProductsRepository::new(ids));

        let context = Self::new(
            Arc::new(SessionStore::with_config(users.clone(), storage, config)),
            Arc::new(MemoryProductsService::new(products.clone())),
        );

        InMemoryParts {
            context,
            users,
            products,
        }
    }

    async fn current_profile(&self) -> Result<PublicProfile, CatalogueError> {
        self.session
            .session()
            .await
            .user_data
            .ok_or(CatalogueError::NotAuthenticated)
    }

    async fn owned_product(
        &self,
        profile: &PublicProfile,
        product: ProductUuid,
    ) -> Result<Product, CatalogueError> {
        let existing = self
            .products
            .get_product(product)
            .await
            .ok_or(CatalogueError::NotFound)?;

        if !existing.is_owned_by(profile) {
            return Err(CatalogueError::NotOwner);
        }

        Ok(existing)
    }

    /// Create a product sold by the signed in user.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in or the draft is invalid.
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogueError> {
        let profile = self.current_profile().await?;
        let product = draft.into_new_product(profile.name)?;

        Ok(self.products.create_product(product).await)
    }

    /// Replace the form fields of a product the signed in user sells.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in, the product is missing or
    /// sold by someone else, or the draft is invalid.
    pub async fn edit_product(
        &self,
        product: ProductUuid,
        draft: ProductDraft,
    ) -> Result<Product, CatalogueError> {
        let profile = self.current_profile().await?;
        let update = draft.into_update()?;

        self.owned_product(&profile, product).await?;

        self.products
            .update_product(product, update)
            .await
            .ok_or(CatalogueError::NotFound)
    }

    /// Delete a product the signed in user sells.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in or the product is missing or
    /// sold by someone else.
    pub async fn remove_product(&self, product: ProductUuid) -> Result<(), CatalogueError> {
        let profile = self.current_profile().await?;

        self.owned_product(&profile, product).await?;

        if !self.products.delete_product(product).await {
            return Err(CatalogueError::NotFound);
        }

        Ok(())
    }

    /// The product listing with `filter` applied for the current user.
    pub async fn browse(&self, filter: &ProductFilter) -> Vec<Product> {
        let session = self.session.session().await;
        let products = self.products.list_products().await;

        filter.apply(products, session.user_name())
    }

    /// How many products the signed in user sells.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody is signed in.
    pub async fn profile_stats(&self) -> Result<usize, CatalogueError> {
        let profile = self.current_profile().await?;

        Ok(self
            .products
            .list_products_by_seller(&profile.name)
            .await
            .len())
    }
}
