//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rocket_cart::notify::{Notifier, Toast, ToastKind};
use rocket_cart::CartState;

/// Output handler for CLI messages.
#[derive(Debug, Clone, Copy)]
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

    /// Print the cart as a table followed by its totals.
    pub fn cart(&self, cart: &CartState) {
        if self.json {
            self.json(cart);
            return;
        }

        self.header("Cart");
        if cart.is_empty() {
            self.info("Your cart is empty.");
            return;
        }

        println!(
            "  {:>4}  {:<40}  {:>10}  {:>6}",
            style("ID").dim(),
            style("PRODUCT").dim(),
            style("PRICE").dim(),
            style("AMOUNT").dim()
        );
        for item in cart {
            println!(
                "  {:>4}  {:<40}  {:>10}  {:>6}",
                item.id(),
                truncate(&item.product.title, 40),
                format_price(item.product.price),
                item.amount
            );
        }

        println!();
        self.kv("products", &cart.len().to_string());
        self.kv("items", &cart.item_count().to_string());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Shows cart toasts on stderr.
impl Notifier for Output {
    fn notify(&self, toast: Toast) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "toast": toast }));
            return;
        }
        let icon = match toast.kind {
            ToastKind::OutOfStock => style("⚠").yellow(),
            ToastKind::Failure => style("✗").red(),
        };
        eprintln!("{} {}", icon, style(&toast.message).red());
    }
}

/// Format a catalog price for display.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}
