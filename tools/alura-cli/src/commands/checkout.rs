//! Checkout: collect the form, place the order, print the receipt.

use alura_app::{Action, CheckoutOutcome, CheckoutView, Page};
use alura_commerce::prelude::*;
use alura_executor::SystemClock;
use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use dialoguer::{Confirm, Input, Password};
use serde::Serialize;

use super::{parse_field, CheckoutArgs};
use crate::context::Context;

/// What gets printed once an order is placed.
#[derive(Serialize)]
struct Receipt<'a> {
    placed_at: DateTime<Local>,
    email: &'a str,
    ship_to: String,
    address: String,
    #[serde(flatten)]
    order: &'a OrderReceipt,
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.open_storefront(SystemClock::new())?;
    storefront.dispatch(Action::Navigate(Page::Checkout));

    let view = storefront.view();
    if view.checkout == CheckoutView::EmptyPrompt {
        ctx.output.header("Your Bag is Empty");
        ctx.output.info("Please add items to proceed to your purchase.");
        return Ok(());
    }

    let mut form = CheckoutForm::new();
    for arg in &args.fields {
        let (name, value) = parse_field(arg)?;
        form.set_field(name, value)?;
    }

    let interactive = !args.no_input && !ctx.output.is_json();
    if interactive {
        prompt_missing(&mut form)?;
    }
    let missing = form.missing_fields();
    if !missing.is_empty() {
        bail!("Missing required fields: {}", missing.join(", "));
    }

    if !ctx.output.is_json() {
        ctx.output.cart(&view);
    }
    if interactive && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", view.totals.total))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Order not placed.");
            return Ok(());
        }
    }

    let result = storefront.dispatch(Action::submit_form(&form));
    let receipt = match result.checkout {
        Some(CheckoutOutcome::Submitted(receipt)) => receipt,
        other => bail!("Order was not placed: {:?}", other),
    };

    let receipt = Receipt {
        placed_at: Local::now(),
        email: form.contact.email.trim(),
        ship_to: form.shipping.full_name(),
        address: form.shipping.one_line(),
        order: &receipt,
    };
    print_receipt(&receipt, ctx);

    if let Some(notification) = storefront.notification() {
        ctx.output.notification(notification);
    }

    // Let the post-order redirect fire before exiting.
    tokio::time::sleep(ctx.config.storefront.checkout_redirect()).await;
    storefront.advance();
    ctx.output.debug(&format!("Page: {}", storefront.page()));

    Ok(())
}

fn prompt_missing(form: &mut CheckoutForm) -> Result<()> {
    for (name, label) in CheckoutForm::FIELDS {
        let filled = form.field(name).is_some_and(|v| !v.trim().is_empty());
        if filled {
            continue;
        }

        let value = if name == "cvv" {
            Password::new().with_prompt(label).interact()?
        } else {
            Input::<String>::new().with_prompt(label).interact_text()?
        };
        form.set_field(name, value)?;
    }
    Ok(())
}

fn print_receipt(receipt: &Receipt<'_>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    ctx.output.header("Order Confirmation");
    ctx.output.kv("Placed", &receipt.placed_at.format("%Y-%m-%d %H:%M:%S").to_string());
    ctx.output.kv("Email", receipt.email);
    ctx.output.kv("Ship to", &receipt.ship_to);
    ctx.output.kv("Address", &receipt.address);
    println!();
    for line in &receipt.order.lines {
        ctx.output.list_item(&format!(
            "{} x {} ({})",
            line.quantity,
            line.product.name,
            line.line_total
        ));
    }
    ctx.output.totals(&receipt.order.totals);
}
