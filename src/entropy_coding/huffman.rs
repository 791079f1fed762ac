use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::alphabet::Symbol;
use crate::error::{Error, Result};
use crate::models::FrequencyModel;
use HuffmanTree::*;

/// Tie-breaking policy between nodes of equal weight.
///
/// Both policies give an optimal (equal average length) code, they differ
/// in the spread of codeword lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariancePolicy {
    /// Merge the shallowest subtrees first, minimising length variance.
    #[default]
    Min,
    /// Merge the deepest subtrees first.
    Max,
}

/// A full binary prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTree {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    /// `left` is reached with a 0 bit, `right` with a 1 bit
    Node {
        left: Box<HuffmanTree>,
        right: Box<HuffmanTree>,
        weight: u64,
    },
}

impl HuffmanTree {
    /// Builds a tree from the nonzero counts of `model`.
    pub fn from_model(model: &FrequencyModel, policy: VariancePolicy) -> Result<Self> {
        let mut heap: BinaryHeap<_> = model
            .counts()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(idx, &count)| {
                let leaf = Leaf { symbol: model.alphabet().symbol(idx), weight: count };
                Pending::new(leaf, 0, idx as i64, policy)
            })
            .collect();

        let leaves = heap.len();
        let mut serial = 0;
        let root = loop {
            let Some(left) = heap.pop() else {
                return Err(Error::DegenerateDistribution);
            };
            let Some(right) = heap.pop() else {
                break left;
            };
            trace!(
                "merging weights {} + {} (heights {}, {})",
                left.tree.weight(),
                right.tree.weight(),
                left.height,
                right.height
            );

            let height = left.height.max(right.height) + 1;
            // bounded by the model total, which fits in u64
            let weight = left.tree.weight() + right.tree.weight();
            let node = Node { left: Box::new(left.tree), right: Box::new(right.tree), weight };
            // newer internal nodes win ties among internal nodes of equal height
            serial += 1;
            heap.push(Pending::new(node, height, -serial, policy));
        };

        debug!(
            "built huffman tree: {} leaves, depth {}, policy {:?}",
            leaves,
            root.height.max(1),
            policy
        );
        Ok(root.tree)
    }

    pub fn weight(&self) -> u64 {
        match self {
            Leaf { weight, .. } | Node { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Leaf { .. })
    }

    /// Number of leaves (symbols with a codeword).
    pub fn leaves(&self) -> usize {
        match self {
            Leaf { .. } => 1,
            Node { left, right, .. } => left.leaves() + right.leaves(),
        }
    }

    /// Longest root-to-leaf path, a lone leaf still gets a 1-bit code.
    pub fn depth(&self) -> usize {
        fn height(tree: &HuffmanTree) -> usize {
            match tree {
                Leaf { .. } => 0,
                Node { left, right, .. } => 1 + height(left).max(height(right)),
            }
        }
        height(self).max(1)
    }
}

/// Builds the minimum-variance Huffman tree for `model`.
pub fn build_huffman_tree(model: &FrequencyModel) -> Result<HuffmanTree> {
    HuffmanTree::from_model(model, VariancePolicy::Min)
}

pub fn build_huffman_tree_with(model: &FrequencyModel, policy: VariancePolicy) -> Result<HuffmanTree> {
    HuffmanTree::from_model(model, policy)
}

/// Working-set entry. Keys are unique, so pop order is fully deterministic.
struct Pending {
    tree: HuffmanTree,
    height: u32,
    /// (weight, height rank, age rank), smallest is merged first
    key: (u64, i64, i64),
}

impl Pending {
    /// `age` is the alphabet index for leaves and `-serial` for internal nodes.
    fn new(tree: HuffmanTree, height: u32, age: i64, policy: VariancePolicy) -> Self {
        let height_rank = match policy {
            VariancePolicy::Min => i64::from(height),
            VariancePolicy::Max => -i64::from(height),
        };
        let key = (tree.weight(), height_rank, age);
        Self { tree, height, key }
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // inverts max-heap to be min-heap
        self.key.cmp(&other.key).reverse()
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
