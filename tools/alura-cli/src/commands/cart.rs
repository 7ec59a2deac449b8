//! Cart commands: show, add, update, remove, clear.

use alura_app::{Action, Storefront};
use alura_commerce::ProductId;
use alura_executor::SystemClock;
use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{AddArgs, ClearArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let storefront = ctx.open_storefront(SystemClock::new())?;
    ctx.output.cart(&storefront.view());
    Ok(())
}

/// Add units of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.open_storefront(SystemClock::new())?;
    let id = known_product(&storefront, args.id)?;

    for action in add_actions(id, args.quantity) {
        storefront.dispatch(action);
    }

    finish(&storefront, ctx);
    Ok(())
}

/// Change a line's quantity.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.open_storefront(SystemClock::new())?;
    let id = ProductId::new(args.id);

    if !update_quantity(&mut storefront, id, args.delta) {
        ctx.output.warn(&format!("Nothing to update for product {}", id));
    }

    finish(&storefront, ctx);
    Ok(())
}

/// Remove a line entirely.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.open_storefront(SystemClock::new())?;
    let id = ProductId::new(args.id);

    let quantity = storefront.cart().cart().quantity_of(id);
    if quantity == 0 {
        bail!("Product {} is not in your bag", id);
    }
    storefront.dispatch(Action::UpdateQuantity {
        id,
        delta: -i64::from(quantity),
    });

    ctx.output.success(&format!("Removed product {}", id));
    finish(&storefront, ctx);
    Ok(())
}

/// Empty the cart.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.open_storefront(SystemClock::new())?;
    if storefront.cart().is_empty() {
        ctx.output.info("Your bag is already empty.");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from your bag?",
                storefront.cart().item_count()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    storefront.dispatch(Action::ClearCart);
    ctx.output.success("Bag cleared.");
    Ok(())
}

/// One add-to-cart, then a single quantity change for the remaining units.
pub fn add_actions(id: ProductId, quantity: u32) -> Vec<Action> {
    let mut actions = vec![Action::AddToCart(id)];
    if quantity > 1 {
        actions.push(Action::UpdateQuantity {
            id,
            delta: i64::from(quantity) - 1,
        });
    }
    actions
}

/// Dispatch a quantity change. Returns whether the line's quantity moved.
///
/// `Dispatched::changed` also covers timers that fired during the dispatch,
/// so the cart itself is compared.
pub fn update_quantity(storefront: &mut Storefront, id: ProductId, delta: i64) -> bool {
    let before = storefront.cart().cart().quantity_of(id);
    storefront.dispatch(Action::UpdateQuantity { id, delta });
    storefront.cart().cart().quantity_of(id) != before
}

fn known_product(storefront: &Storefront, id: u32) -> Result<ProductId> {
    let id = ProductId::new(id);
    if !storefront.catalog().contains(id) {
        bail!("Unknown product {}. Run `alura products` to see the catalog.", id);
    }
    Ok(id)
}

fn finish(storefront: &Storefront, ctx: &Context) {
    let view = storefront.view();
    if let Some(notification) = &view.notification {
        ctx.output.notification(notification);
    }
    ctx.output.cart(&view);
}
