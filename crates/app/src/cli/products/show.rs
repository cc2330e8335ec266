use catalogue::{context::CatalogueContext, products::models::ProductUuid};
use clap::Args;

use crate::output;

#[derive(Debug, Args)]
pub(crate) struct ShowProductArgs {
    /// Product UUID
    product_uuid: ProductUuid,
}

pub(crate) async fn run(context: &CatalogueContext, args: ShowProductArgs) -> Result<(), String> {
    let product = context
        .products
        .get_product(args.product_uuid)
        .await
        .ok_or_else(|| format!("product {} not found", args.product_uuid))?;

    println!("{}", output::product_details(&product));

    Ok(())
}
