use catalogue::{context::CatalogueContext, products::models::ProductUuid};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    /// Product UUID
    product_uuid: ProductUuid,
}

pub(crate) async fn run(context: &CatalogueContext, args: DeleteProductArgs) -> Result<(), String> {
    context
        .remove_product(args.product_uuid)
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted product {}", args.product_uuid);

    Ok(())
}
