use super::FrequencyModel;
use crate::alphabet::{Alphabet, Symbol};
use crate::error::{Error, Result};
use crate::helpers::{histogram, pair_histogram};

/// Order-1 statistics: one [`FrequencyModel`] row per preceding symbol.
///
/// Every adjacent pair `(s[i], s[i + 1])` is one observation of `s[i + 1]`
/// in context `s[i]`. Rows of contexts that never precede anything are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFrequencyModel {
    alphabet: Alphabet,
    rows: Vec<FrequencyModel>,
    /// Successors pooled over all contexts
    successors: FrequencyModel,
    pairs: u64,
}

impl ConditionalFrequencyModel {
    pub fn build(symbols: &[Symbol], alphabet: &Alphabet) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::invalid("symbol sequence is empty"));
        }
        let indices = alphabet.indices(symbols)?;

        let rows = pair_histogram(&indices, alphabet.len())
            .into_iter()
            .map(|counts| FrequencyModel::from_counts(alphabet, counts))
            .collect::<Result<Vec<_>>>()?;
        let successors = FrequencyModel::from_counts(
            alphabet,
            histogram(indices.get(1..).unwrap_or_default(), alphabet.len()),
        )?;
        let pairs = successors.total();

        Ok(Self { alphabet: alphabet.clone(), rows, successors, pairs })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of observed pairs (sequence length - 1).
    pub fn pairs(&self) -> u64 {
        self.pairs
    }

    /// Distribution of symbols following `context`.
    pub fn row(&self, context: Symbol) -> Option<&FrequencyModel> {
        self.alphabet.index_of(context).map(|idx| &self.rows[idx])
    }

    /// `(context, row)` in alphabet order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (Symbol, &FrequencyModel)> + '_ {
        self.rows.iter().enumerate().map(|(idx, row)| (self.alphabet.symbol(idx), row))
    }

    /// Distribution of every symbol that follows some context.
    pub fn successors(&self) -> &FrequencyModel {
        &self.successors
    }

    /// p(s | c), 0 when the context is unobserved.
    pub fn probability(&self, context: Symbol, symbol: Symbol) -> f64 {
        self.row(context).map_or(0.0, |row| row.probability(symbol))
    }

    /// Marginal probability of `context` among pair observations.
    pub fn context_probability(&self, context: Symbol) -> f64 {
        match self.row(context) {
            Some(row) if self.pairs > 0 => row.total() as f64 / self.pairs as f64,
            _ => 0.0,
        }
    }

    pub fn observed_contexts(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_empty()).count()
    }
}
