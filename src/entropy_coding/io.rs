use bitvec::prelude::*;

use super::prefix_codes::CodeTable;
use super::BitSequence;
use crate::alphabet::Symbol;
use crate::error::{Error, Result};

/// Concatenates the codewords of `symbols`. No padding or framing is added,
/// the decoder needs the symbol count.
pub fn encode(symbols: &[Symbol], table: &CodeTable) -> Result<BitSequence> {
    let mut bits = BitSequence::new();
    encode_into(symbols, table, &mut bits)?;
    Ok(bits)
}

/// Appends the codewords of `symbols` to `bits`.
pub fn encode_into(symbols: &[Symbol], table: &CodeTable, bits: &mut BitSequence) -> Result<()> {
    for &sym in symbols {
        let code = table.get(sym).ok_or(Error::SymbolNotInTable(sym))?;
        bits.extend_from_bitslice(code);
    }
    Ok(())
}

/// Decodes exactly `expected_count` symbols from the front of `bits`.
pub fn decode(bits: &BitSlice<u8, Msb0>, table: &CodeTable, expected_count: usize) -> Result<Vec<Symbol>> {
    let decoder = Decoder::new(table);
    let mut reader = bits.iter().by_vals();
    let mut out = Vec::with_capacity(expected_count);
    for _ in 0..expected_count {
        let sym = decoder.decode_one(&mut reader).ok_or(Error::MalformedStream {
            decoded: out.len(),
            expected: expected_count,
        })?;
        out.push(sym);
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy)]
enum TrieNode {
    /// children for bit 0 and bit 1
    Branch([Option<u32>; 2]),
    Leaf(Symbol),
}

/// Decode trie rebuilt from a [`CodeTable`], root at index 0.
///
/// Built from the table rather than from the tree, so that decoding can
/// never disagree with the table the data was encoded with.
#[derive(Debug, Clone)]
pub struct Decoder {
    nodes: Vec<TrieNode>,
}

impl Decoder {
    pub fn new(table: &CodeTable) -> Self {
        let mut nodes = vec![TrieNode::Branch([None; 2])];

        for (sym, code) in table.iter() {
            let mut node = 0;
            for (depth, bit) in code.iter().by_vals().enumerate() {
                let next = nodes.len();
                let TrieNode::Branch(children) = &mut nodes[node] else {
                    debug_assert!(false, "codeword of {sym:?} extends another codeword");
                    break;
                };
                let child = match children[usize::from(bit)] {
                    Some(child) => child as usize,
                    None => {
                        children[usize::from(bit)] = Some(next as u32);
                        next
                    }
                };
                if child == next {
                    let is_last = depth + 1 == code.len();
                    nodes.push(if is_last { TrieNode::Leaf(sym) } else { TrieNode::Branch([None; 2]) });
                }
                node = child;
            }
        }

        Self { nodes }
    }

    /// Reads bits until a leaf is reached.
    /// Returns `None` when the bits run out or a bit leads nowhere.
    pub fn decode_one(&self, bits: &mut impl Iterator<Item = bool>) -> Option<Symbol> {
        let mut node = 0;
        loop {
            match self.nodes[node] {
                TrieNode::Leaf(sym) => return Some(sym),
                TrieNode::Branch(children) => {
                    let bit = bits.next()?;
                    node = children[usize::from(bit)]? as usize;
                }
            }
        }
    }
}
