use std::collections::BTreeMap;

use bitvec::prelude::*;

use super::huffman::HuffmanTree::{self, *};
use super::BitSequence;
use crate::alphabet::Symbol;

/// Symbol -> codeword mapping with the prefix property.
///
/// Only obtainable from a [`HuffmanTree`], so no codeword is a prefix of
/// another and every codeword is at least one bit long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, BitSequence>,
}

impl CodeTable {
    /// Walks the tree depth first, 0 for left and 1 for right.
    /// Also returns the weighted average codeword length.
    pub fn from_tree(root: &HuffmanTree) -> (Self, f64) {
        let mut codes = BTreeMap::new();
        // a total that fits in u64 can still overflow once multiplied by a length
        let mut weighted_bits = 0u128;

        // a lone leaf has no edge to take, give it a single 0
        let start = if root.is_leaf() { bitvec![u8, Msb0; 0] } else { BitSequence::new() };
        let mut dfs = vec![(root, start)];

        while let Some((node, code)) = dfs.pop() {
            match node {
                Leaf { symbol, weight } => {
                    weighted_bits += u128::from(*weight) * code.len() as u128;
                    codes.insert(*symbol, code);
                }
                Node { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    let mut left_code = code;
                    left_code.push(false);
                    dfs.push((right, right_code));
                    dfs.push((left, left_code));
                }
            }
        }

        let average = match root.weight() {
            0 => 0.0,
            total => weighted_bits as f64 / total as f64,
        };
        (Self { codes }, average)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn code_len(&self, symbol: Symbol) -> Option<usize> {
        self.codes.get(&symbol).map(|code| code.len())
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, codeword)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(&sym, code)| (sym, code.as_bitslice()))
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// `sum(2^-len)`, exactly 1 for a code built from a full binary tree
    /// with two or more leaves.
    pub fn kraft_sum(&self) -> f64 {
        self.codes.values().map(|code| (-(code.len() as f64)).exp2()).sum()
    }

    /// Codeword as a string of '0' and '1'.
    pub fn code_string(&self, symbol: Symbol) -> Option<String> {
        self.get(symbol).map(bits_to_string)
    }
}

pub fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
}

/// Flattens `root` into a table plus its average codeword length.
pub fn extract_code_table(root: &HuffmanTree) -> (CodeTable, f64) {
    CodeTable::from_tree(root)
}
