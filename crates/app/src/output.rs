//! Terminal rendering for sessions and products.

use catalogue::{products::models::Product, session::Session};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

const PRODUCT_HEADER: [&str; 6] = ["UUID", "Name", "Category", "Price", "Stock", "Seller"];

pub(crate) fn print_session(session: &Session) {
    match &session.user_data {
        Some(profile) => {
            println!("id: {}", profile.id);
            println!("name: {}", profile.name);
            println!("email: {}", profile.email);
        }
        None => println!("not signed in"),
    }
}

/// One row per product, in listing order.
pub(crate) fn products_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(PRODUCT_HEADER);

    for product in products {
        builder.push_record([
            product.uuid.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            product.stock.to_string(),
            product.seller.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    table.to_string()
}

/// Field per line, for `products show` and after a mutation.
pub(crate) fn product_details(product: &Product) -> String {
    let mut builder = Builder::default();

    let rows = [
        ("uuid", product.uuid.to_string()),
        ("name", product.name.clone()),
        ("description", product.description.clone()),
        ("price", product.price.to_string()),
        ("stock", product.stock.to_string()),
        ("category", product.category.clone()),
        ("seller", product.seller.clone()),
        ("image", product.image.clone().unwrap_or_default()),
        ("active", product.is_active.to_string()),
        ("created_at", product.created_at.to_string()),
        ("updated_at", product.updated_at.to_string()),
    ];

    for (field, value) in rows {
        builder.push_record([field.to_string(), value]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    table.to_string()
}
