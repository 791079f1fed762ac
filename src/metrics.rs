//! Information-theoretic measures of a code against the model it was built from.
//!
//! All functions are pure. Probabilities come from the model counts, so sums
//! are computed over integers first and divided once.

use crate::alphabet::Alphabet;
use crate::entropy_coding::CodeTable;
use crate::error::{Error, Result};
use crate::helpers::plogp;
use crate::models::FrequencyModel;

/// Shannon entropy in bits, `0 * log2(0)` counts as 0.
pub fn entropy(model: &FrequencyModel) -> f64 {
    (0..model.counts().len()).map(|idx| plogp(model.probability_at(idx))).sum()
}

/// Entropy of a uniform distribution over the alphabet.
pub fn iid_entropy(alphabet: &Alphabet) -> f64 {
    (alphabet.len() as f64).log2()
}

/// `sum(p * len)`, fails if a symbol with p > 0 has no codeword.
pub fn average_length(model: &FrequencyModel, table: &CodeTable) -> Result<f64> {
    if model.is_empty() {
        return Ok(0.0);
    }
    let bits: u128 = lengths(model, table)?
        .into_iter()
        .map(|(count, len)| u128::from(count) * len as u128)
        .sum();
    Ok(bits as f64 / model.total() as f64)
}

/// `entropy / average_length * 100`.
pub fn efficiency(model: &FrequencyModel, table: &CodeTable) -> Result<f64> {
    efficiency_of(entropy(model), average_length(model, table)?)
}

/// Efficiency from precomputed values, `Undefined` for a zero length.
pub fn efficiency_of(entropy: f64, average_length: f64) -> Result<f64> {
    if average_length > 0.0 {
        Ok(entropy / average_length * 100.0)
    } else {
        Err(Error::Undefined("efficiency with zero average length"))
    }
}

/// `sum(p * (len - avg)^2)`, the spread the variance policy acts on.
pub fn length_variance(model: &FrequencyModel, table: &CodeTable) -> Result<f64> {
    let avg = average_length(model, table)?;
    if model.is_empty() {
        return Ok(0.0);
    }
    let spread: f64 = lengths(model, table)?
        .into_iter()
        .map(|(count, len)| count as f64 * (len as f64 - avg).powi(2))
        .sum();
    Ok(spread / model.total() as f64)
}

/// `(count, codeword length)` of every symbol with a nonzero count.
fn lengths(model: &FrequencyModel, table: &CodeTable) -> Result<Vec<(u64, usize)>> {
    model
        .support()
        .map(|sym| {
            let len = table.code_len(sym).ok_or(Error::SymbolNotInTable(sym))?;
            Ok((model.count(sym), len))
        })
        .collect()
}

/// Measures of one code, in bits per symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub entropy: f64,
    pub average_length: f64,
    /// Percent, `None` when not computable
    pub efficiency: Option<f64>,
    pub length_variance: f64,
}

impl Metrics {
    pub fn compute(model: &FrequencyModel, table: &CodeTable) -> Result<Self> {
        let entropy = entropy(model);
        let average_length = average_length(model, table)?;
        Ok(Self {
            entropy,
            average_length,
            efficiency: efficiency_of(entropy, average_length).ok(),
            length_variance: length_variance(model, table)?,
        })
    }

    /// Bits lost per symbol compared to the entropy.
    pub fn redundancy(&self) -> f64 {
        self.average_length - self.entropy
    }
}
