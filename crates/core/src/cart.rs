//! Session cart model.
//!
//! A cart is an ordered list of lines. Lines are appended on "add" and
//! removed by position on "remove"; the total is recomputed from the lines on
//! every read so it can never drift from the contents.

use serde::{Deserialize, Serialize};

use crate::types::Price;

/// One user-added item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub price: f64,
}

impl CartLine {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Cart state for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line. Insertion order is display order.
    pub fn add_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Remove the line at `index`, shifting later lines down.
    ///
    /// An out-of-range index leaves the cart untouched and returns `None`.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line prices.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Total in the catalog currency.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::from_amount(self.total())
    }
}
