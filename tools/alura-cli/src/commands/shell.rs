//! Interactive storefront session.
//!
//! Reads commands from stdin while the storefront's timers keep running:
//! notifications fade and clear, and a placed order returns to the home page,
//! whether or not the shopper is typing.

use std::io::Write as _;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use alura_app::{
    Action, CheckoutOutcome, CheckoutView, NotificationKind, NotificationPhase, Page, Storefront,
    StorefrontObserver, StorefrontView,
};
use alura_commerce::prelude::*;
use alura_executor::SystemClock;
use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{cart, products};
use crate::context::Context;
use crate::output::Output;

const CONTACT: &str = "Contact us: support@alura.com";
const LEGAL: &str = "Terms of Service and Privacy Policy displayed in console.";

const HELP: &[(&str, &str)] = &[
    ("products [category]", "list the collection"),
    ("add <id>", "add one unit to your bag"),
    ("inc <id> / dec <id>", "change a quantity by one"),
    ("update <id> <delta>", "change a quantity by any amount"),
    ("remove <id>", "remove a line"),
    ("clear", "empty your bag"),
    ("bag", "open or close your bag"),
    ("cart", "show your bag"),
    ("go <home|about|checkout>", "change page"),
    ("checkout", "proceed to checkout from your bag"),
    ("set <field> <value>", "fill a checkout field"),
    ("form", "show the checkout form"),
    ("submit", "place the order"),
    ("contact", "how to reach us"),
    ("legal", "terms of service and privacy policy"),
    ("help", "show this list"),
    ("quit", "leave"),
];

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Products(Option<String>),
    Cart,
    Add(ProductId),
    Update(ProductId, i64),
    Remove(ProductId),
    Clear,
    ToggleBag,
    Go(Page),
    Checkout,
    Set(String, String),
    Form,
    Submit,
    Contact,
    Legal,
    Quit,
}

/// Why a shell line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a product id: {0}")]
    InvalidId(String),

    #[error("not a quantity change: {0}")]
    InvalidDelta(String),

    #[error("no such page: {0}")]
    UnknownPage(String),
}

impl ShellCommand {
    /// Parse a line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellParseError> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "products" | "ls" => {
                Self::Products(Some(rest).filter(|r| !r.is_empty()).map(str::to_string))
            }
            "cart" => Self::Cart,
            "add" => Self::Add(id_arg(rest, "add <id>")?),
            "inc" => Self::Update(id_arg(rest, "inc <id>")?, 1),
            "dec" => Self::Update(id_arg(rest, "dec <id>")?, -1),
            "update" => {
                let usage = "update <id> <delta>";
                let (id, delta) = split_word(rest).ok_or(ShellParseError::Usage(usage))?;
                let delta = delta.trim();
                if delta.is_empty() {
                    return Err(ShellParseError::Usage(usage));
                }
                let delta = delta
                    .parse()
                    .map_err(|_| ShellParseError::InvalidDelta(delta.to_string()))?;
                Self::Update(id_arg(id, usage)?, delta)
            }
            "remove" | "rm" => Self::Remove(id_arg(rest, "remove <id>")?),
            "clear" => Self::Clear,
            "bag" => Self::ToggleBag,
            "go" => {
                if rest.is_empty() {
                    return Err(ShellParseError::Usage("go <home|about|checkout>"));
                }
                let page =
                    Page::from_str(rest).map_err(|_| ShellParseError::UnknownPage(rest.to_string()))?;
                Self::Go(page)
            }
            "checkout" => Self::Checkout,
            "set" => {
                let (field, value) =
                    split_word(rest).ok_or(ShellParseError::Usage("set <field> <value>"))?;
                Self::Set(field.to_string(), value.trim().to_string())
            }
            "form" => Self::Form,
            "submit" => Self::Submit,
            "contact" => Self::Contact,
            "legal" => Self::Legal,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ShellParseError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    })
}

fn id_arg(arg: &str, usage: &'static str) -> Result<ProductId, ShellParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(ShellParseError::Usage(usage));
    }
    arg.parse()
        .map_err(|_| ShellParseError::InvalidId(arg.to_string()))
}

/// Run the shell.
pub async fn run(ctx: &Context) -> Result<()> {
    let clock = SystemClock::new();
    let mut storefront = ctx.open_storefront(clock)?;
    let initial = storefront.view();
    storefront.subscribe(TerminalRenderer::new(ctx.output.clone(), &initial));

    let mut form = CheckoutForm::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ctx.output.header("Alúra");
    ctx.output.info("Conscious Curation. Lasting Quality. Type 'help' for commands.");
    prompt();

    loop {
        let deadline = storefront.next_timer_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match ShellCommand::parse(&line) {
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(command)) => execute(command, &mut storefront, &mut form, &ctx.output),
                    Ok(None) => {}
                    Err(e) => ctx.output.warn(&e.to_string()),
                }
                prompt();
            }
            _ = sleep_until(clock, deadline) => {
                storefront.advance();
            }
        }
    }

    tracing::debug!(items = storefront.cart().item_count(), "shell closed");
    Ok(())
}

async fn sleep_until(clock: SystemClock, deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(clock.instant_at(deadline).into()).await,
        None => std::future::pending().await,
    }
}

fn prompt() {
    print!("alura> ");
    if let Err(e) = std::io::stdout().flush() {
        tracing::debug!(error = %e, "failed to flush prompt");
    }
}

fn execute(command: ShellCommand, storefront: &mut Storefront, form: &mut CheckoutForm, output: &Output) {
    match command {
        ShellCommand::Help => {
            for &(usage, what) in HELP {
                output.table_row(&[usage, what], &[26, 40]);
            }
        }
        ShellCommand::Products(category) => {
            let catalog = storefront.catalog();
            let products: Vec<&Product> = catalog
                .products()
                .iter()
                .filter(|p| {
                    category
                        .as_deref()
                        .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
                })
                .collect();
            products::render(output, catalog, &products);
        }
        ShellCommand::Cart => output.cart(&storefront.view()),
        ShellCommand::Add(id) => {
            if !storefront.catalog().contains(id) {
                output.warn(&format!("Unknown product {}", id));
                return;
            }
            storefront.dispatch(Action::AddToCart(id));
        }
        ShellCommand::Update(id, delta) => {
            if !cart::update_quantity(storefront, id, delta) {
                output.warn(&format!("Nothing to update for product {}", id));
            }
        }
        ShellCommand::Remove(id) => {
            let quantity = storefront.cart().cart().quantity_of(id);
            if quantity == 0 {
                output.warn(&format!("Product {} is not in your bag", id));
                return;
            }
            storefront.dispatch(Action::UpdateQuantity {
                id,
                delta: -i64::from(quantity),
            });
        }
        ShellCommand::Clear => {
            storefront.dispatch(Action::ClearCart);
        }
        ShellCommand::ToggleBag => {
            storefront.dispatch(Action::ToggleCart);
        }
        ShellCommand::Go(page) => {
            storefront.dispatch(Action::Navigate(page));
        }
        ShellCommand::Checkout => {
            if !storefront.dispatch(Action::ProceedToCheckout).changed {
                output.warn("Add items to your bag before checking out.");
            }
        }
        ShellCommand::Set(field, value) => match form.set_field(&field, value) {
            Ok(()) => output.success(&format!("{} set", field)),
            Err(e) => output.warn(&e.to_string()),
        },
        ShellCommand::Form => {
            output.header("Checkout Details");
            for (name, label) in CheckoutForm::FIELDS {
                let value = form.field(name).unwrap_or_default();
                let shown = if value.trim().is_empty() {
                    "(missing)".to_string()
                } else if name == "cvv" || name == "card_number" {
                    mask(value)
                } else {
                    value.to_string()
                };
                output.kv(&format!("{label} [{name}]"), &shown);
            }
        }
        ShellCommand::Submit => {
            let result = storefront.dispatch(Action::submit_form(form));
            match result.checkout {
                Some(CheckoutOutcome::Submitted(receipt)) => {
                    output.success(&format!(
                        "Charged {} for {} items (simulated).",
                        receipt.totals.total,
                        receipt.item_count()
                    ));
                    *form = CheckoutForm::new();
                }
                Some(CheckoutOutcome::IncompleteForm) => {
                    output.warn(&format!("Missing: {}", form.missing_fields().join(", ")));
                }
                Some(CheckoutOutcome::EmptyCart) => output.warn("Your bag is empty."),
                Some(CheckoutOutcome::NotOnCheckout) | None => {
                    output.warn("Go to checkout first ('go checkout').")
                }
            }
        }
        ShellCommand::Contact => {
            storefront.dispatch(Action::notify(CONTACT, NotificationKind::Success));
        }
        ShellCommand::Legal => {
            tracing::info!("terms of service and privacy policy requested");
            storefront.dispatch(Action::notify(LEGAL, NotificationKind::Success));
        }
        ShellCommand::Quit => {}
    }
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.trim().chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Prints what changed since the last view.
struct TerminalRenderer {
    output: Output,
    last: Mutex<Rendered>,
}

#[derive(Debug, Clone, PartialEq)]
struct Rendered {
    page: Page,
    notification: Option<(u64, NotificationPhase)>,
    item_count: u64,
    subtotal: Money,
    cart_open: bool,
}

impl Rendered {
    fn of(view: &StorefrontView) -> Self {
        Self {
            page: view.page,
            notification: view.notification.as_ref().map(|n| (n.seq, n.phase)),
            item_count: view.item_count,
            subtotal: view.totals.subtotal,
            cart_open: view.cart_open,
        }
    }
}

impl TerminalRenderer {
    fn new(output: Output, initial: &StorefrontView) -> Self {
        Self {
            output,
            last: Mutex::new(Rendered::of(initial)),
        }
    }

    fn render_page(&self, view: &StorefrontView) {
        match view.page {
            Page::Home => {
                self.output.header("Home");
                self.output.info("Type 'products' to browse the collection.");
            }
            Page::About => {
                self.output.header("About Alúra");
                self.output
                    .info("Conscious curation of beauty, fashion and home goods made to last.");
            }
            Page::Checkout => match view.checkout {
                CheckoutView::EmptyPrompt => {
                    self.output.header("Your Bag is Empty");
                    self.output.info("Please add items to proceed to your purchase.");
                    self.output.info("Type 'go home' to continue shopping.");
                }
                CheckoutView::Form => {
                    self.output.header("Secure Checkout");
                    self.output.cart(view);
                    self.output
                        .info("Fill in your details with 'set <field> <value>', then 'submit'.");
                }
            },
        }
    }
}

impl StorefrontObserver for TerminalRenderer {
    fn on_change(&self, view: &StorefrontView) {
        let Ok(mut last) = self.last.lock() else {
            return;
        };
        let now = Rendered::of(view);

        if now.page != last.page {
            self.render_page(view);
        }
        if now.cart_open != last.cart_open {
            if now.cart_open {
                self.output.cart(view);
                if !view.can_checkout() {
                    self.output.info("Checkout is unavailable while your bag is empty.");
                }
            } else {
                self.output.info("Bag closed.");
            }
        } else if now.item_count != last.item_count || now.subtotal != last.subtotal {
            self.output.info(&format!(
                "Bag: {} items, subtotal {}",
                view.item_count, view.totals.subtotal
            ));
        }
        if now.notification != last.notification {
            if let Some(notification) = &view.notification {
                self.output.notification(notification);
            }
        }

        *last = now;
    }
}
