//! Output formatting for the CLI.

use alura_app::{Notification, NotificationKind, NotificationPhase, StorefrontView};
use alura_commerce::prelude::*;
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a notification the way the storefront shows it.
    pub fn notification(&self, notification: &Notification) {
        if self.json {
            return;
        }
        let badge = match notification.kind {
            NotificationKind::Success => style("✓").green(),
            NotificationKind::Error => style("✗").magenta(),
        };
        match notification.phase {
            NotificationPhase::Visible => println!("{} {}", badge, style(&notification.message).bold()),
            NotificationPhase::Fading => println!("{} {}", badge, style(&notification.message).dim()),
        }
    }

    /// Print the cart lines and totals of a view.
    pub fn cart(&self, view: &StorefrontView) {
        if self.json {
            self.json(view);
            return;
        }

        self.header(&format!("Your Bag ({})", view.item_count));
        if view.lines.is_empty() {
            self.info("Your bag is empty.");
            return;
        }

        self.table_row(&["ID", "PRODUCT", "QTY", "TOTAL"], &[5, 32, 5, 10]);
        for line in &view.lines {
            self.table_row(
                &[
                    &line.product.id.to_string(),
                    &line.product.name,
                    &line.quantity.to_string(),
                    &line.line_total.display(),
                ],
                &[5, 32, 5, 10],
            );
        }
        self.totals(&view.totals);
    }

    /// Print a totals breakdown.
    pub fn totals(&self, totals: &Totals) {
        if self.json {
            return;
        }
        println!();
        self.kv("Subtotal", &totals.subtotal.display());
        self.kv("Shipping", &totals.shipping.display());
        self.kv("Tax", &totals.tax.display());
        println!("  {}: {}", style("Total").bold(), style(totals.total.display()).bold());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Category label, colored per category.
pub fn category_badge(category: &str) -> String {
    match category.to_lowercase().as_str() {
        c if c.contains("beauty") => style(category).magenta().to_string(),
        c if c.contains("fashion") => style(category).cyan().to_string(),
        c if c.contains("home") => style(category).green().to_string(),
        _ => category.to_string(),
    }
}
