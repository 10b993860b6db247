//! Tabular rendering of products for the console.

use std::io::{self, Write};

use crate::ledger::Ledger;
use crate::product::Product;

const RULE_WIDTH: usize = 87;

/// Renders product tables with a currency label after every amount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    currency: String,
}

impl Report {
    /// Create a renderer using `currency` as the amount suffix.
    #[must_use]
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// The currency label.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Write every product of `ledger` followed by the stock value and count.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_inventory(&self, out: &mut impl Write, ledger: &Ledger) -> io::Result<()> {
        if ledger.is_empty() {
            return writeln!(out, "\nNo products in stock.");
        }

        Self::write_header(out)?;
        for product in ledger.products() {
            self.write_row(out, product)?;
        }
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "{:>52} {:>15.2}{}",
            "Total stock value:",
            ledger.stock_value(),
            self.currency
        )?;
        writeln!(out, "{:>52} {:>15}", "Number of products:", ledger.len())
    }

    /// Write the products matching `term`, or a notice if none do.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_search(
        &self,
        out: &mut impl Write,
        term: &str,
        matches: &[&Product],
    ) -> io::Result<()> {
        Self::write_header(out)?;
        for product in matches {
            self.write_row(out, product)?;
        }
        if matches.is_empty() {
            writeln!(out, "No product found for '{term}'")?;
        }
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))
    }

    fn write_header(out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "\n{:<10} {:<30} {:<10} {:>15} {:>15}",
            "ID", "Name", "Quantity", "Unit Price", "Line Value"
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))
    }

    fn write_row(&self, out: &mut impl Write, product: &Product) -> io::Result<()> {
        writeln!(
            out,
            "{:<10} {:<30} {:<10} {:>15.2}{} {:>15.2}{}",
            product.id,
            product.name,
            product.quantity,
            product.unit_price,
            self.currency,
            product.line_value(),
            self.currency
        )
    }
}
