pub mod huffman;
pub mod io;
pub mod prefix_codes;

#[cfg(test)]
mod tests;

use bitvec::prelude::*;

pub use self::huffman::{build_huffman_tree, build_huffman_tree_with, HuffmanTree, VariancePolicy};
pub use self::io::{decode, encode, encode_into, Decoder};
pub use self::prefix_codes::{bits_to_string, extract_code_table, CodeTable};

/// Bits in stream order, the first bit is the most significant of byte 0.
pub type BitSequence = BitVec<u8, Msb0>;
