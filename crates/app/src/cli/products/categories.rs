use catalogue::{context::CatalogueContext, products::categories};

pub(crate) async fn run(context: &CatalogueContext) -> Result<(), String> {
    let products = context.products.list_products().await;

    for category in categories(&products) {
        println!("{category}");
    }

    Ok(())
}
