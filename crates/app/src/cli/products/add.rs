use catalogue::{context::CatalogueContext, products::ProductDraft};
use clap::Args;

use crate::output;

#[derive(Debug, Args)]
pub(crate) struct AddProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Longer description
    #[arg(long, default_value = "")]
    description: String,

    /// Price as a decimal number
    #[arg(long)]
    price: String,

    /// Units in stock; anything unparsable counts as zero
    #[arg(long, default_value = "")]
    stock: String,

    /// Category name
    #[arg(long)]
    category: String,

    /// Image URI
    #[arg(long)]
    image: Option<String>,
}

impl From<AddProductArgs> for ProductDraft {
    fn from(args: AddProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            stock: args.stock,
            category: args.category,
            image: args.image,
        }
    }
}

pub(crate) async fn run(context: &CatalogueContext, args: AddProductArgs) -> Result<(), String> {
    let product = context
        .add_product(args.into())
        .await
        .map_err(|error| format!("failed to add product: {error}"))?;

    println!("{}", output::product_details(&product));

    Ok(())
}
