//! Weight tables and weighted command selection.
//!
//! A [`WeightTable`] keeps its entries in declaration order. Selection walks
//! the entries in that order, so a fixed draw always selects the same
//! command regardless of how the table is stored elsewhere.

use crate::core::command::normalize_name;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by weighted selection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectionError {
    #[error("Cannot select from an empty weight table")]
    EmptyTable,

    #[error("Cannot select when the total weight is zero")]
    ZeroTotalWeight,

    #[error("Cannot select when the total weight is not finite")]
    NonFiniteTotal,
}

/// Ordered mapping from command name to selection weight.
///
/// Inserting a name that is already present replaces its weight but keeps
/// its original position.
///
/// # Example
///
/// ```rust
/// use stochastic_fsm::core::WeightTable;
///
/// let table = WeightTable::new().with("fetch", 3.0).with("store", 1.0);
///
/// assert_eq!(table.total(), 4.0);
/// assert_eq!(table.select(0.5), Ok("fetch"));
/// assert_eq!(table.select(3.0), Ok("store"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    entries: Vec<(String, f64)>,
}

impl WeightTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the weight for `name`.
    pub fn insert(&mut self, name: &str, weight: f64) {
        let name = normalize_name(name);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((name, weight)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, weight: f64) -> Self {
        self.insert(name, weight);
        self
    }

    /// Weight declared for `name`, if any.
    pub fn get(&self, name: &str) -> Option<f64> {
        let name = normalize_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, w)| *w)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, w)| (n.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| *w).sum()
    }

    /// Select the entry whose half-open interval contains `draw`.
    ///
    /// Intervals are laid out in declaration order as
    /// `[running_sum, running_sum + weight)`. A draw at or beyond the
    /// accumulated total (which rounding can produce) falls to the last
    /// entry with a positive weight. Zero-weight entries are never selected.
    pub fn select(&self, draw: f64) -> Result<&str, SelectionError> {
        if self.entries.is_empty() {
            return Err(SelectionError::EmptyTable);
        }

        let mut running = 0.0;
        let mut last_positive = None;
        for (name, weight) in &self.entries {
            if *weight <= 0.0 {
                continue;
            }
            let upper = running + weight;
            if draw >= running && draw < upper {
                return Ok(name.as_str());
            }
            running = upper;
            last_positive = Some(name.as_str());
        }

        last_positive.ok_or(SelectionError::ZeroTotalWeight)
    }

    /// Draw uniformly in `[0, total)` and select the matching entry.
    ///
    /// Fails if the total is zero or not finite.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, SelectionError> {
        if self.entries.is_empty() {
            return Err(SelectionError::EmptyTable);
        }
        let total = self.total();
        if !total.is_finite() {
            return Err(SelectionError::NonFiniteTotal);
        }
        if total <= 0.0 {
            return Err(SelectionError::ZeroTotalWeight);
        }

        let draw = rng.gen::<f64>() * total;
        self.select(draw)
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = WeightTable::new();
        for (name, weight) in iter {
            table.insert(name.as_ref(), weight);
        }
        table
    }
}
