use catalogue::context::CatalogueContext;
use clap::{Args, Subcommand};

mod add;
mod categories;
mod delete;
mod edit;
mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, newest first
    List(list::ListProductsArgs),
    /// Show one product
    Show(show::ShowProductArgs),
    /// List the categories in use
    Categories,
    /// Add a product sold by the signed in user
    Add(add::AddProductArgs),
    /// Edit a product sold by the signed in user
    Edit(edit::EditProductArgs),
    /// Delete a product sold by the signed in user
    Delete(delete::DeleteProductArgs),
}

pub(crate) async fn run(context: &CatalogueContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list::run(context, args).await,
        ProductsSubcommand::Show(args) => show::run(context, args).await,
        ProductsSubcommand::Categories => categories::run(context).await,
        ProductsSubcommand::Add(args) => add::run(context, args).await,
        ProductsSubcommand::Edit(args) => edit::run(context, args).await,
        ProductsSubcommand::Delete(args) => delete::run(context, args).await,
    }
}
