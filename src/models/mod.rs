pub mod order0;
pub mod order1;

pub use self::{order0::*, order1::*};

use crate::alphabet::{Alphabet, Symbol};
use crate::error::Result;

/// Counts `symbols` into an order-0 model.
pub fn build_frequency_model(symbols: &[Symbol], alphabet: &Alphabet) -> Result<FrequencyModel> {
    FrequencyModel::build(symbols, alphabet)
}

/// Counts adjacent pairs of `symbols` into an order-1 model.
pub fn build_conditional_frequency_model(
    symbols: &[Symbol],
    alphabet: &Alphabet,
) -> Result<ConditionalFrequencyModel> {
    ConditionalFrequencyModel::build(symbols, alphabet)
}
