//! Backing-file storage for stockledger.
//!
//! The ledger is persisted as a line-oriented text file:
//!
//! ```text
//! # Stock file
//! # Format: ID| Name| Quantity| Price
//! A1| Rice| 10| 500.00
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Lines that cannot be
//! parsed are skipped rather than failing the load. Saves rewrite the whole
//! file through a temporary file in the same directory, so an interrupted
//! save never leaves a truncated stock file behind.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::product::{validate_id, validate_name, Product, COMMENT_MARKER, FIELD_SEPARATOR};

/// Header written at the top of every stock file.
pub const HEADER: [&str; 2] = ["# Stock file", "# Format: ID| Name| Quantity| Price"];

/// Handle on the stock file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

/// Outcome of loading the stock file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// The loaded ledger.
    pub ledger: Ledger,
    /// Data lines skipped because they could not be parsed.
    pub skipped: usize,
    /// Well-formed records dropped for a repeated id or exceeding capacity.
    pub discarded: usize,
}

impl Store {
    /// Create a handle for the stock file at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the stock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the stock file with only its header if it does not exist.
    ///
    /// Returns `true` if the file was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.create_parent_dir()?;

        let mut contents = String::new();
        for line in HEADER {
            contents.push_str(line);
            contents.push('\n');
        }
        fs::write(&self.path, contents).map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })?;

        info!("Created stock file at {}", self.path.display());
        Ok(true)
    }

    /// Load every well-formed record into a ledger bounded by `capacity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read. Malformed lines
    /// are not errors.
    pub fn load(&self, capacity: usize) -> Result<LoadReport> {
        let file = fs::File::open(&self.path).map_err(|source| Error::StoreOpen {
            path: self.path.clone(),
            source,
        })?;

        let mut products = Vec::new();
        let mut skipped = 0;
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|source| Error::StoreOpen {
                path: self.path.clone(),
                source,
            })?;
            let line = String::from_utf8_lossy(&line);
            if is_ignored(&line) {
                continue;
            }
            match parse_line(&line) {
                Some(product) => products.push(product),
                None => {
                    debug!(
                        "Skipping malformed line {} in {}",
                        index + 1,
                        self.path.display()
                    );
                    skipped += 1;
                }
            }
        }

        let (ledger, discarded) = Ledger::from_products(products, capacity);
        info!(
            "Loaded {} products from {} ({} skipped, {} discarded)",
            ledger.len(),
            self.path.display(),
            skipped,
            discarded
        );
        Ok(LoadReport {
            ledger,
            skipped,
            discarded,
        })
    }

    /// Overwrite the stock file with the contents of `ledger`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or moved into
    /// place. The previous stock file is left intact in that case.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let dir = self.create_parent_dir()?;
        let write_err = |source: std::io::Error| Error::StoreWrite {
            path: self.path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        temp.write_all(render(ledger).as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|err| write_err(err.error))?;

        info!("Saved {} products to {}", ledger.len(), self.path.display());
        Ok(())
    }

    /// Create the parent directory if needed and return it.
    fn create_parent_dir(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(|source| Error::DirectoryCreate {
                path: parent.clone(),
                source,
            })?;
        }
        Ok(parent)
    }
}

/// Render a ledger in stock file format.
#[must_use]
pub fn render(ledger: &Ledger) -> String {
    let mut out = String::new();
    for line in HEADER {
        out.push_str(line);
        out.push('\n');
    }
    for product in ledger.products() {
        out.push_str(&format_line(product));
        out.push('\n');
    }
    out
}

/// Format one product as a data line, without the line terminator.
#[must_use]
pub fn format_line(product: &Product) -> String {
    format!(
        "{}| {}| {}| {:.2}",
        product.id, product.name, product.quantity, product.unit_price
    )
}

/// Parse a data line into a product.
///
/// The first four `|`-separated fields are the id, name, quantity and price;
/// further fields and anything after the price number are ignored. Returns
/// `None` if any field is missing or invalid.
#[must_use]
pub fn parse_line(line: &str) -> Option<Product> {
    let mut fields = line.split(FIELD_SEPARATOR).map(str::trim);
    let id = fields.next()?;
    let name = fields.next()?;
    let quantity = fields.next()?;
    let price = fields.next()?;

    if validate_id(id).is_err() || validate_name(name).is_err() {
        return None;
    }
    let quantity: u32 = quantity.parse().ok()?;
    let unit_price: f64 = price.split_whitespace().next()?.parse().ok()?;
    if !unit_price.is_finite() {
        return None;
    }

    Some(Product {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit_price,
    })
}

fn is_ignored(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}
