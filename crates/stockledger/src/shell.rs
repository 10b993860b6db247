//! Interactive menu over a ledger.
//!
//! [`Shell`] reads operator input line by line from any [`BufRead`] and
//! writes prompts and results to any [`Write`], so the binary can wire it to
//! stdin/stdout while tests drive it from in-memory buffers. Failed ledger
//! operations are reported to the operator and never end the session; only
//! console I/O errors are returned.

use std::io::{self, BufRead, Write};

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::product::{validate_id, validate_name, Product, ProductUpdate, MIN_UNIT_PRICE};
use crate::report::Report;
use crate::store::Store;

const MENU: &str = "\n========================================\
                    \n    STOCK MANAGEMENT SYSTEM\
                    \n========================================\
                    \n  1. Add a product\
                    \n  2. Modify a product\
                    \n  3. Delete a product\
                    \n  4. List all products\
                    \n  5. Search products\
                    \n  6. Quit\
                    \n========================================";

/// Entry in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a product.
    Add,
    /// Modify a product.
    Modify,
    /// Delete a product.
    Delete,
    /// List all products.
    List,
    /// Search products by id or name.
    Search,
    /// Leave the menu.
    Quit,
}

impl MenuChoice {
    /// Parse the operator's menu input (`1` to `6`).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Add),
            2 => Some(Self::Modify),
            3 => Some(Self::Delete),
            4 => Some(Self::List),
            5 => Some(Self::Search),
            6 => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Session behavior taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellOptions {
    /// Save after every successful change.
    pub autosave: bool,
    /// Label printed after amounts.
    pub currency: String,
}

impl From<&Config> for ShellOptions {
    fn from(config: &Config) -> Self {
        Self {
            autosave: config.session.autosave,
            currency: config.display.currency.clone(),
        }
    }
}

/// Prepare the stock file and load it, reporting problems to `out`.
///
/// Neither a failure to create the file nor a failure to read it is fatal:
/// the session then starts with an empty ledger.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn open_ledger(store: &Store, capacity: usize, out: &mut impl Write) -> io::Result<Ledger> {
    match store.ensure_exists() {
        Ok(true) => writeln!(out, "Created initial stock file {}", store.path().display())?,
        Ok(false) => {}
        Err(err) => {
            warn!("{err}");
            writeln!(out, "Error creating stock file: {err}")?;
        }
    }

    match store.load(capacity) {
        Ok(report) => {
            if report.discarded > 0 {
                warn!(
                    "{} stored products were dropped (repeated id or over capacity {})",
                    report.discarded, capacity
                );
            }
            Ok(report.ledger)
        }
        Err(err) => {
            warn!("{err}");
            writeln!(out, "Error: cannot open {}", store.path().display())?;
            Ok(Ledger::new(capacity))
        }
    }
}

/// Menu-driven session over a ledger.
#[derive(Debug)]
pub struct Shell<R, W> {
    input: R,
    output: W,
    ledger: Ledger,
    store: Store,
    report: Report,
    autosave: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a session over `ledger`, persisting to `store`.
    #[must_use]
    pub fn new(input: R, output: W, ledger: Ledger, store: Store, options: ShellOptions) -> Self {
        Self {
            input,
            output,
            ledger,
            store,
            report: Report::new(options.currency),
            autosave: options.autosave,
        }
    }

    /// The ledger as currently edited.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Consume the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu until the operator quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the console fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("\nYour choice (1-6): ")? else {
                debug!("Console input closed, leaving menu");
                writeln!(self.output)?;
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Add) => self.add_product()?,
                Some(MenuChoice::Modify) => self.modify_product()?,
                Some(MenuChoice::Delete) => self.delete_product()?,
                Some(MenuChoice::List) => {
                    self.report.write_inventory(&mut self.output, &self.ledger)?;
                }
                Some(MenuChoice::Search) => self.search_products()?,
                Some(MenuChoice::Quit) => break,
                None => writeln!(self.output, "\nInvalid choice. Please try again.")?,
            }
        }
        writeln!(self.output, "\nThank you for using the stock manager. Goodbye!")?;
        Ok(())
    }

    /// Write the ledger to the stock file and report the outcome.
    ///
    /// Returns whether the save succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the console fails.
    pub fn save(&mut self) -> Result<bool> {
        match self.store.save(&self.ledger) {
            Ok(()) => {
                writeln!(self.output, "Saved to {}", self.store.path().display())?;
                Ok(true)
            }
            Err(err) => {
                error!("{err}");
                writeln!(self.output, "Error saving stock file: {err}")?;
                Ok(false)
            }
        }
    }

    fn add_product(&mut self) -> Result<()> {
        if self.ledger.is_full() {
            return self.report_failure(&Error::StockFull {
                capacity: self.ledger.capacity(),
            });
        }

        let Some(id) = self.prompt("\nProduct ID: ")? else {
            return Ok(());
        };
        let id = id.trim().to_string();
        if let Err(err) = validate_id(&id) {
            return self.report_failure(&err);
        }
        if self.ledger.contains(&id) {
            return self.report_failure(&Error::DuplicateId { id });
        }

        let Some(name) = self.prompt_until("Product name: ", "Invalid name! Try again: ", |s| {
            let name = s.trim();
            validate_name(name).ok().map(|()| name.to_string())
        })?
        else {
            return Ok(());
        };

        let Some(quantity) = self.prompt_until(
            "Quantity: ",
            "Invalid quantity! Try again: ",
            |s| s.trim().parse::<u32>().ok(),
        )?
        else {
            return Ok(());
        };

        let price_label = format!("Unit price ({}): ", self.report.currency());
        let retry = format!("Invalid price! Must be greater than {MIN_UNIT_PRICE:.2}: ");
        let Some(unit_price) = self.prompt_until(&price_label, &retry, |s| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p > MIN_UNIT_PRICE)
        })?
        else {
            return Ok(());
        };

        let added = Product::new(id, name, quantity, unit_price)
            .and_then(|product| self.ledger.add(product));
        match added {
            Ok(()) => {
                writeln!(self.output, "\nProduct added successfully!")?;
                self.autosave()
            }
            Err(err) => self.report_failure(&err),
        }
    }

    fn modify_product(&mut self) -> Result<()> {
        let Some(id) = self.prompt("\nID of the product to modify: ")? else {
            return Ok(());
        };
        let id = id.trim().to_string();
        let Some(current) = self.ledger.get(&id).cloned() else {
            return self.report_failure(&Error::not_found(id));
        };

        writeln!(self.output, "\nCurrent name: {}", current.name)?;
        let Some(name) = self.prompt("New name (blank or 0 to keep): ")? else {
            return Ok(());
        };
        let name = name.trim();
        let name = if name.is_empty() || name == "0" {
            None
        } else if let Err(err) = validate_name(name) {
            writeln!(self.output, "{err}; keeping current name")?;
            None
        } else {
            Some(name.to_string())
        };

        writeln!(self.output, "\nCurrent quantity: {}", current.quantity)?;
        let Some(quantity) = self.prompt("New quantity (blank to keep): ")? else {
            return Ok(());
        };
        let quantity = quantity.trim().parse::<u32>().ok();

        writeln!(
            self.output,
            "\nCurrent price: {:.2} {}",
            current.unit_price,
            self.report.currency()
        )?;
        let Some(price) = self.prompt("New price (blank to keep): ")? else {
            return Ok(());
        };
        let unit_price = price.trim().parse::<f64>().ok();

        let update = ProductUpdate {
            name,
            quantity,
            unit_price,
        };
        match self.ledger.modify(&id, update) {
            Ok(_) => {
                writeln!(self.output, "\nProduct modified successfully!")?;
                self.autosave()
            }
            Err(err) => self.report_failure(&err),
        }
    }

    fn delete_product(&mut self) -> Result<()> {
        let Some(id) = self.prompt("\nID of the product to delete: ")? else {
            return Ok(());
        };
        match self.ledger.delete(id.trim()) {
            Ok(_) => {
                writeln!(self.output, "\nProduct deleted successfully!")?;
                self.autosave()
            }
            Err(err) => self.report_failure(&err),
        }
    }

    fn search_products(&mut self) -> Result<()> {
        let Some(term) = self.prompt("\nSearch term (ID or name): ")? else {
            return Ok(());
        };
        let matches = self.ledger.search(&term);
        self.report.write_search(&mut self.output, &term, &matches)?;
        Ok(())
    }

    fn autosave(&mut self) -> Result<()> {
        if !self.autosave {
            return Ok(());
        }
        if let Err(err) = self.store.save(&self.ledger) {
            error!("Autosave failed: {err}");
            writeln!(self.output, "Autosave failed: {err}")?;
        }
        Ok(())
    }

    fn report_failure(&mut self, err: &Error) -> Result<()> {
        debug!("Operation rejected: {err}");
        match err {
            Error::StockFull { .. } => {
                writeln!(self.output, "\nStock is full! Cannot add a product.")?;
            }
            Error::DuplicateId { .. } => {
                writeln!(self.output, "\nA product with this ID already exists!")?;
            }
            Error::NotFound { .. } => writeln!(self.output, "\nProduct not found!")?,
            other => writeln!(self.output, "\n{other}")?,
        }
        Ok(())
    }

    /// Print `label` and read one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Prompt repeatedly until `parse` accepts the input.
    fn prompt_until<T>(
        &mut self,
        label: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let mut label = label;
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&line) {
                return Ok(Some(value));
            }
            label = retry;
        }
    }
}
