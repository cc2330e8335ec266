use catalogue::{
    context::CatalogueContext,
    products::{ProductFilter, SellerScope},
};
use clap::Args;

use crate::output;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// Case-insensitive substring of the product name
    #[arg(long, default_value = "")]
    search: String,

    /// Exact category
    #[arg(long)]
    category: Option<String>,

    /// Only products sold by the signed in user
    #[arg(long)]
    mine: bool,
}

impl From<ListProductsArgs> for ProductFilter {
    fn from(args: ListProductsArgs) -> Self {
        Self {
            search: args.search,
            category: args.category,
            scope: if args.mine {
                SellerScope::Mine
            } else {
                SellerScope::All
            },
        }
    }
}

pub(crate) async fn run(context: &CatalogueContext, args: ListProductsArgs) -> Result<(), String> {
    let products = context.browse(&ProductFilter::from(args)).await;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", output::products_table(&products));

    Ok(())
}
