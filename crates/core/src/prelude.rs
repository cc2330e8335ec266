//! Catalogue prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    context::{CatalogueContext, CatalogueError, InMemoryParts},
    fixtures::{Fixture, FixtureError},
    ids::{IdGenerator, SequentialIds, TimeOrderedIds, TypedUuid},
    products::{
        MemoryProductsService, ProductDraft, ProductFilter, ProductInputError, ProductsRepository,
        ProductsService, SellerScope, categories,
        debounce::{DEFAULT_SEARCH_DEBOUNCE, Debounce, spawn_debounced},
        models::{NewProduct, Product, ProductUpdate, ProductUuid},
    },
    session::{
        FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, ProfileIdPolicy, Session,
        SessionConfig, SessionError, SessionService, SessionState, SessionStore, StorageError,
    },
    users::{NewUser, Password, PublicProfile, UserRecord, UserUuid, UsersRepository},
};
