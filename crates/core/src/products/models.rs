//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedUuid, users::PublicProfile};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    /// Display name of the creating user at creation time.
    #[serde(rename = "vendeur")]
    pub seller: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Whether `profile` is the seller, compared by display name.
    #[must_use]
    pub fn is_owned_by(&self, profile: &PublicProfile) -> bool {
        self.seller == profile.name
    }

    pub(crate) fn apply(&mut self, update: ProductUpdate) {
        let ProductUpdate {
            name,
            description,
            price,
            stock,
            category,
            seller,
            image,
            is_active,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(seller) = seller {
            self.seller = seller;
        }
        if let Some(image) = image {
            self.image = Some(image);
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    #[serde(rename = "vendeur")]
    pub seller: String,
    pub image: Option<String>,
    pub is_active: bool,
}

/// Product Update Model
///
/// Only the fields set to `Some` replace the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub seller: Option<String>,
    /// A new image replaces the stored one; an image is never cleared.
    pub image: Option<String>,
    pub is_active: Option<bool>,
}
