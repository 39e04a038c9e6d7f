//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shopfront_commerce::cart::CartLine;
use shopfront_commerce::catalog::Product;
use shopfront_commerce::Money;

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

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
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
        println!("  {}", formatted.join("  ").trim_end());
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

/// Column widths for product tables.
pub const PRODUCT_COLUMNS: [usize; 4] = [24, 34, 14, 12];

/// Column widths for cart tables.
pub const CART_COLUMNS: [usize; 4] = [34, 5, 14, 14];

/// Price with the old price struck through when on sale.
pub fn price_label(product: &Product) -> String {
    match product.compare_at_price.filter(|_| product.is_on_sale()) {
        Some(was) => format!(
            "{} {}",
            style(product.price.display()).green(),
            style(was.display()).dim().strikethrough()
        ),
        None => product.price.display(),
    }
}

/// Short badges for a product: tag, discount, free shipping.
pub fn product_badges(product: &Product) -> String {
    let mut badges = Vec::new();
    if let Some(tag) = &product.tag {
        badges.push(style(tag.clone()).magenta().to_string());
    }
    if let Some(off) = product.discount_percentage() {
        badges.push(style(format!("-{}%", off)).green().to_string());
    }
    if product.free_shipping {
        badges.push(style("frete grátis").cyan().to_string());
    }
    badges.join(" ")
}

/// Line name including the chosen variant.
pub fn line_label(line: &CartLine) -> String {
    match line.variant_label() {
        Some(variant) => format!("{} ({})", line.item.name, variant),
        None => line.item.name.clone(),
    }
}

/// Money right-aligned for table columns.
pub fn money_cell(amount: Money) -> String {
    format!("{:>14}", amount.display())
}

/// Truncate text to `width` characters with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Galaxy", 10), "Galaxy");
        assert_eq!(truncate("Galaxy S24 Ultra", 8), "Galaxy …");
        assert_eq!(truncate("Câmera", 6), "Câmera");
    }

    #[test]
    fn test_money_cell_alignment() {
        let cell = money_cell(Money::new(99_990));
        assert_eq!(cell.chars().count(), 14);
        assert!(cell.ends_with("R$ 999,90"));
    }
}
