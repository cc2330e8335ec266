//! Fixtures
//!
//! Seed users and products loaded from YAML at startup.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    products::{ProductsRepository, models::NewProduct},
    users::{NewUser, Password, UsersRepository},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A seed user reuses an email already taken
    #[error("Duplicate user email: {0}")]
    DuplicateEmail(String),

    /// Product with a negative price
    #[error("Negative price for product: {0}")]
    NegativePrice(String),
}

/// User entry
#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Product entry
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    pub category: String,
    #[serde(alias = "vendeur")]
    pub seller: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// Fixture
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

impl Fixture {
    /// Parse a fixture document.
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Seed both repositories. Products keep their listed order.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate user email, within the document or
    /// against users already present, or on a negative price. The whole
    /// document is checked first, so nothing is seeded when it fails.
    pub async fn load_into(
        self,
        users: &UsersRepository,
        products: &ProductsRepository,
    ) -> Result<(), FixtureError> {
        let mut seeded = Vec::with_capacity(self.products.len());

        for product in self.products {
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(FixtureError::NegativePrice(product.name));
            }

            seeded.push(NewProduct {
                name: product.name,
                description: product.description,
                price: product.price,
                stock: product.stock,
                category: product.category,
                seller: product.seller,
                image: product.image,
                is_active: product.is_active,
            });
        }

        let mut emails = FxHashSet::default();

        for user in &self.users {
            if !emails.insert(user.email.as_str()) || users.email_exists(&user.email).await {
                return Err(FixtureError::DuplicateEmail(user.email.clone()));
            }
        }

        users
            .seed(self.users.into_iter().map(|user| NewUser {
                name: user.name,
                email: user.email,
                password: Password::new(user.password),
            }))
            .await;
        products.seed(seeded).await;

        Ok(())
    }
}
