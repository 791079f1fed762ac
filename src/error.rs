//! Error types for model construction, coding and metrics.

use thiserror::Error;

/// Error variants for Huffman modelling and coding.
///
/// Every variant is recoverable. Errors are `Clone` so that the order-1
/// extension can keep one outcome per context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input sequence or model parameters are unusable.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// A symbol in the input is not part of the alphabet.
    #[error("invalid input: symbol {0:?} is not in the alphabet")]
    SymbolNotInAlphabet(char),

    /// Every weight is zero, there is nothing to build a code for.
    #[error("degenerate distribution: all probabilities are zero")]
    DegenerateDistribution,

    /// Encoding (or a metric) needed a codeword the table doesn't have.
    #[error("symbol {0:?} has no codeword in the table")]
    SymbolNotInTable(char),

    /// The bit sequence ended early or walked off the code trie.
    #[error("malformed stream: decoded {decoded} of {expected} symbols")]
    MalformedStream {
        /// Symbols successfully decoded before the failure
        decoded: usize,
        /// Symbols the caller asked for
        expected: usize,
    },

    /// A metric is not computable (e.g. efficiency with zero average length).
    #[error("undefined: {0}")]
    Undefined(&'static str),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidInput { reason: reason.into() }
    }

    /// Both `InvalidInput` and `SymbolNotInAlphabet` describe bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. } | Error::SymbolNotInAlphabet(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
