use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Alphabet symbols are plain characters.
pub type Symbol = char;

/// A fixed, ordered set of symbols without duplicates.
///
/// Order only matters for tie-breaking during tree construction and for
/// reporting. Cloning is cheap, models and tables share one copy.
#[derive(Debug, Clone)]
pub struct Alphabet {
    inner: Arc<Tables>,
}

#[derive(Debug)]
struct Tables {
    /// index -> symbol
    dec_table: Vec<Symbol>,
    /// symbol -> index
    enc_table: HashMap<Symbol, usize>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self> {
        let dec_table: Vec<_> = symbols.into_iter().collect();
        if dec_table.is_empty() {
            return Err(Error::invalid("alphabet is empty"));
        }

        let mut enc_table = HashMap::with_capacity(dec_table.len());
        for (idx, &sym) in dec_table.iter().enumerate() {
            if enc_table.insert(sym, idx).is_some() {
                return Err(Error::invalid(format!("duplicate alphabet symbol {sym:?}")));
            }
        }

        Ok(Self { inner: Arc::new(Tables { dec_table, enc_table }) })
    }

    /// Blank, digits and uppercase latin letters (37 symbols).
    pub fn standard() -> Self {
        let symbols = std::iter::once(' ').chain('0'..='9').chain('A'..='Z');
        let dec_table: Vec<_> = symbols.collect();
        let enc_table = dec_table.iter().enumerate().map(|(i, &s)| (s, i)).collect();
        Self { inner: Arc::new(Tables { dec_table, enc_table }) }
    }

    pub fn len(&self) -> usize {
        self.inner.dec_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.dec_table.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.inner.dec_table
    }

    pub fn index_of(&self, symbol: Symbol) -> Option<usize> {
        self.inner.enc_table.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.inner.enc_table.contains_key(&symbol)
    }

    /// Panics if `idx` is out of range.
    pub fn symbol(&self, idx: usize) -> Symbol {
        self.inner.dec_table[idx]
    }

    /// Maps every symbol to its index, failing on the first unknown one.
    pub fn indices(&self, symbols: &[Symbol]) -> Result<Vec<usize>> {
        symbols
            .iter()
            .map(|&sym| self.index_of(sym).ok_or(Error::SymbolNotInAlphabet(sym)))
            .collect()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.symbols() == other.symbols()
    }
}

impl Eq for Alphabet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.len(), 37);
        assert_eq!(alphabet.symbol(0), ' ');
        assert_eq!(alphabet.index_of('0'), Some(1));
        assert_eq!(alphabet.index_of('9'), Some(10));
        assert_eq!(alphabet.index_of('A'), Some(11));
        assert_eq!(alphabet.index_of('Z'), Some(36));
        assert_eq!(alphabet.index_of('a'), None);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(Alphabet::new("ABA".chars()).unwrap_err().is_invalid_input());
        assert!(Alphabet::new(std::iter::empty()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn indices_reports_first_unknown() {
        let alphabet = Alphabet::new("AB".chars()).unwrap();
        assert_eq!(alphabet.indices(&['B', 'A']).unwrap(), [1, 0]);
        assert_eq!(alphabet.indices(&['A', 'x', 'y']), Err(Error::SymbolNotInAlphabet('x')));
    }
}
