//! Static Huffman codes over a fixed alphabet, order-0 and order-1.
//!
//! ```text
//! symbols -> FrequencyModel -> HuffmanTree -> CodeTable -> encode/decode
//!                    \______________________________/
//!                               metrics
//! ```
//!
//! The order-1 extension repeats the pipeline per preceding symbol and folds
//! the per-context metrics into means.

pub mod alphabet;
pub mod conditional;
pub mod entropy_coding;
pub mod error;
pub mod helpers;
pub mod metrics;
pub mod models;
pub mod options;

pub use alphabet::{Alphabet, Symbol};
pub use conditional::{
    build_conditional_code_table, ConditionalCodeTable, ConditionalSummary, ContextCode, ContextCoder,
};
pub use entropy_coding::{
    build_huffman_tree, build_huffman_tree_with, decode, encode, extract_code_table, BitSequence, CodeTable,
    HuffmanTree, VariancePolicy,
};
pub use error::{Error, Result};
pub use metrics::{average_length, efficiency, entropy, iid_entropy, Metrics};
pub use models::{build_conditional_frequency_model, build_frequency_model, ConditionalFrequencyModel, FrequencyModel};
pub use options::{Options, UnobservedContext};
