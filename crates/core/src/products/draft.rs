//! Product form input.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::models::{NewProduct, Product, ProductUpdate};

#[derive(Debug, Error, PartialEq)]
pub enum ProductInputError {
    #[error("name, price and category are required")]
    MissingRequiredFields,

    #[error("price is not a number")]
    InvalidPrice(#[source] rust_decimal::Error),

    #[error("price cannot be negative")]
    NegativePrice,
}

/// Raw text as typed into the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub image: Option<String>,
}

struct Validated {
    price: Decimal,
    stock: u32,
}

impl ProductDraft {
    fn validate(&self) -> Result<Validated, ProductInputError> {
        if [&self.name, &self.price, &self.category]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ProductInputError::MissingRequiredFields);
        }

        let price =
            Decimal::from_str(self.price.trim()).map_err(ProductInputError::InvalidPrice)?;

        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductInputError::NegativePrice);
        }

        // Blank or unparsable stock counts as empty shelves.
        let stock = self.stock.trim().parse::<u32>().unwrap_or(0);

        Ok(Validated { price, stock })
    }

    /// Validate and attribute to `seller`. New products are always active.
    ///
    /// # Errors
    ///
    /// Returns an error when a required field is blank or the price is not a
    /// non-negative number.
    pub fn into_new_product(self, seller: impl Into<String>) -> Result<NewProduct, ProductInputError> {
        let Validated { price, stock } = self.validate()?;

        Ok(NewProduct {
            name: self.name,
            description: self.description,
            price,
            stock,
            category: self.category,
            seller: seller.into(),
            image: self.image,
            is_active: true,
        })
    }

    /// Validate into an update replacing every form field.
    ///
    /// # Errors
    ///
    /// Same rules as [`ProductDraft::into_new_product`].
    pub fn into_update(self) -> Result<ProductUpdate, ProductInputError> {
        let Validated { price, stock } = self.validate()?;

        Ok(ProductUpdate {
            name: Some(self.name),
            description: Some(self.description),
            price: Some(price),
            stock: Some(stock),
            category: Some(self.category),
            image: self.image,
            ..ProductUpdate::default()
        })
    }
}

/// Prefill the edit form from a stored product.
impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Shoe".to_string(),
            description: "Leather".to_string(),
            price: "19.99".to_string(),
            stock: "5".to_string(),
            category: "Shoes".to_string(),
            image: None,
        }
    }

    #[test]
    fn valid_draft_becomes_active_product() -> TestResult {
        let product = draft().into_new_product("Alice")?;

        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.stock, 5);
        assert_eq!(product.seller, "Alice");
        assert!(product.is_active);

        Ok(())
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let result = ProductDraft {
            category: "   ".to_string(),
            ..draft()
        }
        .into_new_product("Alice");

        assert_eq!(result, Err(ProductInputError::MissingRequiredFields));
    }

    #[test]
    fn unparsable_price_is_rejected() {
        let result = ProductDraft {
            price: "cheap".to_string(),
            ..draft()
        }
        .into_new_product("Alice");

        assert!(
            matches!(result, Err(ProductInputError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = ProductDraft {
            price: "-1".to_string(),
            ..draft()
        }
        .into_update();

        assert_eq!(result, Err(ProductInputError::NegativePrice));
    }

    #[test]
    fn unparsable_stock_defaults_to_zero() -> TestResult {
        let product = ProductDraft {
            stock: "lots".to_string(),
            ..draft()
        }
        .into_new_product("Alice")?;

        assert_eq!(product.stock, 0);

        Ok(())
    }

    #[test]
    fn update_leaves_seller_untouched() -> TestResult {
        let update = draft().into_update()?;

        assert_eq!(update.seller, None);
        assert_eq!(update.price, Some(Decimal::new(1999, 2)));

        Ok(())
    }

    #[test]
    fn prefilled_draft_round_trips_product_fields() -> TestResult {
        let stored = draft().into_new_product("Alice")?;
        let product = Product {
            uuid: crate::products::models::ProductUuid::from_uuid(uuid::Uuid::from_u128(1)),
            name: stored.name,
            description: stored.description,
            price: stored.price,
            stock: stored.stock,
            category: stored.category,
            seller: stored.seller,
            image: Some("shoe.png".to_string()),
            is_active: stored.is_active,
            created_at: jiff::Timestamp::UNIX_EPOCH,
            updated_at: jiff::Timestamp::UNIX_EPOCH,
        };

        let prefilled = ProductDraft::from(&product);

        assert_eq!(prefilled.price, "19.99");
        assert_eq!(prefilled.stock, "5");
        assert_eq!(prefilled.image.as_deref(), Some("shoe.png"));

        Ok(())
    }
}
