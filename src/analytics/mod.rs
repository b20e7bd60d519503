//! Analytics reductions behind the earnings, grooming and hotel views.
//!
//! DESIGN
//! ======
//! Every reduction is a pure function of already-fetched records plus an
//! explicit clock (`now`), so results are deterministic and testable. Nothing
//! is cached: page holders recompute on demand whenever their data or the
//! selected period changes.
//!
//! Grouped outputs keep first-seen order of their keys, which is the order the
//! dashboard charts plot them in.

pub mod earnings;
pub mod grooming;
pub mod hotel;

use std::collections::HashMap;
use std::hash::Hash;

pub use earnings::{EarningsReport, Period, PeriodAnchor};
pub use grooming::GroomingSummary;
pub use hotel::{HotelSummary, TimeFrame};

/// Accumulator keyed by `K` that remembers first-seen key order.
pub(crate) struct Tally<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V: Default> Tally<K, V> {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }

    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.clone(), V::default()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[slot].1
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// Round to two decimals, the precision every view displays.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
