use crate::alphabet::{Alphabet, Symbol};
use crate::error::{Error, Result};
use crate::helpers::histogram;

/// Static order-0 statistics: a count per alphabet symbol.
///
/// Built once from data and immutable afterwards. A model with a zero total
/// only appears as an unobserved row of a conditional model.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyModel {
    alphabet: Alphabet,
    counts: Vec<u64>,
    total: u64,
}

impl FrequencyModel {
    /// Counts every symbol of a non-empty sequence.
    pub fn build(symbols: &[Symbol], alphabet: &Alphabet) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::invalid("symbol sequence is empty"));
        }
        let indices = alphabet.indices(symbols)?;
        Self::from_counts(alphabet, histogram(&indices, alphabet.len()))
    }

    /// Wraps an existing histogram, `counts[i]` belongs to `alphabet.symbol(i)`.
    pub fn from_counts(alphabet: &Alphabet, counts: Vec<u64>) -> Result<Self> {
        if counts.len() != alphabet.len() {
            return Err(Error::invalid(format!(
                "{} counts for an alphabet of {} symbols",
                counts.len(),
                alphabet.len()
            )));
        }
        let total = counts
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| Error::invalid("total count overflows u64"))?;
        Ok(Self { alphabet: alphabet.clone(), counts, total })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// No observations at all.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count of `symbol`, 0 if it isn't in the alphabet.
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.alphabet.index_of(symbol).map_or(0, |idx| self.counts[idx])
    }

    pub fn probability(&self, symbol: Symbol) -> f64 {
        self.alphabet.index_of(symbol).map_or(0.0, |idx| self.probability_at(idx))
    }

    pub fn probability_at(&self, idx: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.counts[idx] as f64 / self.total as f64
    }

    /// `(symbol, probability)` in alphabet order, zero entries included.
    pub fn probabilities(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
        (0..self.counts.len()).map(|idx| (self.alphabet.symbol(idx), self.probability_at(idx)))
    }

    /// Symbols with a nonzero count, in alphabet order.
    pub fn support(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(idx, _)| self.alphabet.symbol(idx))
    }
}
