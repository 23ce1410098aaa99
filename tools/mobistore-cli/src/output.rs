//! Terminal rendering for the storefront.
//!
//! Human output goes to stdout with `console` styling; in `--json` mode
//! only the JSON documents are printed and errors go to stderr as JSON.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use mobistore_commerce::cart::{LineItemView, TotalView};
use mobistore_commerce::catalog::ProductRecord;
use mobistore_commerce::checkout::OrderConfirmationView;
use mobistore_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a JSON document.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn info(&self, msg: &str) {
        self.human(|| println!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.human(|| println!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        self.human(|| eprintln!("{} {}", style("⚠").yellow(), msg));
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Verbose-only note on stderr.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.human(|| eprintln!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    pub fn header(&self, msg: &str) {
        self.human(|| println!("\n{}", style(msg).bold().underlined()));
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.human(|| println!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.human(|| println!("  {} {}", style("•").dim(), item));
    }

    /// One cart row: name, quantity, unit price and line total.
    pub fn cart_line(&self, line: &LineItemView) {
        self.human(|| {
            let line_total = line
                .line_total
                .map(|m| m.display())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} {} {}",
                style("•").dim(),
                style(&line.name).bold(),
                style(format!("({})", line.id)).dim()
            );
            println!(
                "      {} x {} = {}",
                line.quantity,
                line.unit_price.display(),
                style(line_total).cyan()
            );
            if let Some(description) = &line.description {
                println!("      {}", style(description).dim());
            }
        });
    }

    /// The total bar under the cart.
    pub fn cart_total(&self, total: &TotalView) {
        self.human(|| {
            println!(
                "\n  {} {}",
                style("Total").bold(),
                style(total.display()).bold().green()
            )
        });
    }

    /// Product detail page.
    pub fn product(&self, record: &ProductRecord, price: Option<Money>) {
        self.human(|| {
            println!("\n{}", style(&record.name).bold().underlined());
            println!("  {}: {}", style("id").dim(), record.id);
            if let Some(brand) = &record.brand {
                println!("  {}: {}", style("brand").dim(), brand);
            }
            let price = price
                .map(|m| m.display())
                .unwrap_or_else(|| record.price.to_string());
            println!("  {}: {}", style("price").dim(), style(price).green());
            if let Some(description) = &record.description {
                println!("  {}: {}", style("about").dim(), description);
            }
            if let Some(image) = &record.image {
                println!("  {}: {}", style("image").dim(), image);
            }
        });
    }

    /// Order confirmation banner.
    pub fn order_placed(&self, confirmation: &OrderConfirmationView) {
        self.human(|| {
            println!("{} {}", style("✓").green(), style(confirmation.message()).bold());
            println!("  {}: {}", style("Total").dim(), confirmation.total.display());
            println!(
                "  {}: {}",
                style("Continue shopping").dim(),
                confirmation.shop_more_link
            );
        });
    }

    /// A navigation hop.
    pub fn redirect(&self, from: &str, to: &str) {
        self.human(|| println!("  {} {} {}", from, style("→").yellow(), to));
    }

    /// Spinner for lookups in flight; hidden in JSON mode.
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

    fn human(&self, print: impl FnOnce()) {
        if !self.json {
            print();
        }
    }
}
