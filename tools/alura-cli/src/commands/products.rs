//! Catalog listing.

use alura_commerce::catalog::{Catalog, Product};
use alura_executor::SystemClock;
use anyhow::Result;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{category_badge, Output};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.open_storefront(SystemClock::new())?;
    let catalog = storefront.catalog();

    let products: Vec<&Product> = match &args.category {
        Some(category) => catalog
            .products()
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect(),
        None => catalog.products().iter().collect(),
    };

    render(&ctx.output, catalog, &products);
    Ok(())
}

/// Print a product table.
pub fn render(output: &Output, catalog: &Catalog, products: &[&Product]) {
    if output.is_json() {
        output.json(&products);
        return;
    }

    output.header("The Alúra Collection");
    if products.is_empty() {
        output.info("No products match.");
        output.info(&format!("Categories: {}", catalog.categories().join(", ")));
        return;
    }

    output.table_row(&["ID", "PRODUCT", "PRICE", "CATEGORY"], &[5, 32, 10, 20]);
    for product in products {
        output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &product.price.display(),
                &category_badge(&product.category),
            ],
            &[5, 32, 10, 20],
        );
    }
}
