use catalogue::{
    context::CatalogueContext,
    products::{ProductDraft, models::ProductUuid},
};
use clap::Args;

use crate::output;

#[derive(Debug, Args)]
pub(crate) struct EditProductArgs {
    /// Product UUID
    product_uuid: ProductUuid,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New price
    #[arg(long)]
    price: Option<String>,

    /// New stock
    #[arg(long)]
    stock: Option<String>,

    /// New category
    #[arg(long)]
    category: Option<String>,

    /// New image URI
    #[arg(long)]
    image: Option<String>,
}

impl EditProductArgs {
    /// Overlay the given flags on the current form values.
    fn apply_to(self, draft: &mut ProductDraft) {
        let fields = [
            (self.name, &mut draft.name),
            (self.description, &mut draft.description),
            (self.price, &mut draft.price),
            (self.stock, &mut draft.stock),
            (self.category, &mut draft.category),
        ];

        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }

        if self.image.is_some() {
            draft.image = self.image;
        }
    }
}

pub(crate) async fn run(context: &CatalogueContext, args: EditProductArgs) -> Result<(), String> {
    let product_uuid = args.product_uuid;

    let current = context
        .products
        .get_product(product_uuid)
        .await
        .ok_or_else(|| format!("product {product_uuid} not found"))?;

    let mut draft = ProductDraft::from(&current);
    args.apply_to(&mut draft);

    let product = context
        .edit_product(product_uuid, draft)
        .await
        .map_err(|error| format!("failed to edit product: {error}"))?;

    println!("{}", output::product_details(&product));

    Ok(())
}
