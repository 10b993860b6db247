//! Core product types for stockledger.
//!
//! This module defines the stock-keeping record and the partial update applied
//! by the modify operation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest unit price accepted when a product is created (exclusive).
pub const MIN_UNIT_PRICE: f64 = 0.01;

/// Maximum length of a product id, in characters.
pub const MAX_ID_LEN: usize = 19;

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LEN: usize = 49;

/// Field separator used by the backing file.
pub(crate) const FIELD_SEPARATOR: char = '|';

/// Lines of the backing file starting with this marker are comments.
pub(crate) const COMMENT_MARKER: char = '#';

/// A single stock-keeping record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Caller-supplied identifier, unique within a ledger.
    pub id: String,

    /// Free-text product name.
    pub name: String,

    /// Units in stock.
    pub quantity: u32,

    /// Price of one unit.
    pub unit_price: f64,
}

impl Product {
    /// Create a new product, validating every field.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the id or name is malformed, or if the
    /// unit price is not strictly greater than [`MIN_UNIT_PRICE`].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();
        validate_id(&id)?;
        validate_name(&name)?;
        validate_new_price(unit_price)?;
        Ok(Self {
            id,
            name,
            quantity,
            unit_price,
        })
    }

    /// Value of this line of stock (`quantity × unit_price`).
    #[must_use]
    pub fn line_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    /// Check whether `term` occurs in the id or the name (case-sensitive).
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.id.contains(term) || self.name.contains(term)
    }
}

/// Replacement values for an existing product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New name.
    pub name: Option<String>,
    /// New quantity. Zero is a legitimate value.
    pub quantity: Option<u32>,
    /// New unit price.
    pub unit_price: Option<f64>,
}

impl ProductUpdate {
    /// Check if the update leaves every field untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.unit_price.is_none()
    }

    /// Validate the replacement values.
    ///
    /// Prices only need to be finite and non-negative here, which is weaker
    /// than the check applied at creation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed name or price.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.unit_price {
            if !price.is_finite() || price < 0.0 {
                return Err(Error::invalid_price(price, "must be a non-negative number"));
            }
        }
        Ok(())
    }

    /// Apply the update to `product`. Call [`validate`](Self::validate) first.
    pub(crate) fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.unit_price {
            product.unit_price = price;
        }
    }
}

/// Validate a product id.
///
/// # Errors
///
/// Returns [`Error::InvalidId`] when the id is empty, longer than
/// [`MAX_ID_LEN`], starts with the comment marker `#`, or contains whitespace
/// or the field separator.
pub fn validate_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        "must not be empty"
    } else if id.starts_with(COMMENT_MARKER) {
        "must not start with '#'"
    } else if id.chars().count() > MAX_ID_LEN {
        "must be at most 19 characters"
    } else if id.chars().any(char::is_whitespace) {
        "must not contain whitespace"
    } else if id.contains(FIELD_SEPARATOR) {
        "must not contain '|'"
    } else {
        return Ok(());
    };
    Err(Error::InvalidId {
        id: id.to_string(),
        reason,
    })
}

/// Validate a product name.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when the name is longer than
/// [`MAX_NAME_LEN`], has leading or trailing whitespace, or contains a line
/// break or the field separator.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.chars().count() > MAX_NAME_LEN {
        "must be at most 49 characters"
    } else if name.contains(['\n', '\r']) {
        "must be a single line"
    } else if name.trim() != name {
        "must not start or end with whitespace"
    } else if name.contains(FIELD_SEPARATOR) {
        "must not contain '|'"
    } else {
        return Ok(());
    };
    Err(Error::InvalidName { reason })
}

fn validate_new_price(price: f64) -> Result<()> {
    if price.is_finite() && price > MIN_UNIT_PRICE {
        Ok(())
    } else {
        Err(Error::invalid_price(price, "must be greater than 0.01"))
    }
}
