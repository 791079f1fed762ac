//! Order-1 extension: one Huffman code per preceding symbol.
//!
//! Every context goes through the same pipeline as an order-0 model
//! (tree, table, metrics) independently of the others, so the loop runs on
//! the rayon pool and a context that can't be coded only fails for itself.

use bitvec::prelude::*;
use log::{debug, warn};
use rayon::prelude::*;

use crate::alphabet::{Alphabet, Symbol};
use crate::entropy_coding::{
    build_huffman_tree_with, encode_into, extract_code_table, BitSequence, CodeTable, Decoder,
    VariancePolicy,
};
use crate::error::{Error, Result};
use crate::metrics::{efficiency_of, Metrics};
use crate::models::{ConditionalFrequencyModel, FrequencyModel};
use crate::options::{Options, UnobservedContext};

/// Code and measures of a single context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextCode {
    pub table: CodeTable,
    pub metrics: Metrics,
    /// Built from the pooled successor distribution, the context itself
    /// was never observed
    pub fallback: bool,
}

impl ContextCode {
    fn build(model: &FrequencyModel, variance: VariancePolicy) -> Result<Self> {
        let tree = build_huffman_tree_with(model, variance)?;
        let (table, _) = extract_code_table(&tree);
        let metrics = Metrics::compute(model, &table)?;
        Ok(Self { table, metrics, fallback: false })
    }
}

/// Aggregates over the observed contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionalSummary {
    pub observed_contexts: usize,
    /// Unweighted mean of per-context entropies
    pub mean_entropy: f64,
    /// Unweighted mean of per-context average lengths
    pub mean_average_length: f64,
    /// `mean_entropy / mean_average_length * 100`, not a mean of efficiencies
    pub efficiency: Option<f64>,
    /// H(X | C), per-context entropies weighted by p(c)
    pub conditional_entropy: f64,
    /// Per-context average lengths weighted by p(c)
    pub bits_per_symbol: f64,
}

/// One outcome per alphabet symbol used as context.
#[derive(Debug, Clone)]
pub struct ConditionalCodeTable {
    alphabet: Alphabet,
    contexts: Vec<Result<ContextCode>>,
    summary: ConditionalSummary,
}

impl ConditionalCodeTable {
    pub fn build(model: &ConditionalFrequencyModel, options: &Options) -> Self {
        let fallback = match options.unobserved {
            UnobservedContext::Skip => None,
            UnobservedContext::FallbackOrder0 => Some(
                ContextCode::build(model.successors(), options.variance)
                    .map(|code| ContextCode { fallback: true, ..code }),
            ),
        };

        let rows: Vec<_> = model.rows().collect();
        let contexts: Vec<_> = rows
            .into_par_iter()
            .map(|(ctx, row)| {
                if !row.is_empty() {
                    return ContextCode::build(row, options.variance);
                }
                match &fallback {
                    Some(code) => {
                        debug!("context {ctx:?} unobserved, using the successor distribution");
                        code.clone()
                    }
                    None => {
                        debug!("context {ctx:?} unobserved, no code built");
                        Err(Error::Undefined("context never observed"))
                    }
                }
            })
            .collect();

        let summary = summarize(model, &contexts);
        if summary.observed_contexts == 0 {
            warn!("no context was observed, order-1 statistics are undefined");
        }
        Self { alphabet: model.alphabet().clone(), contexts, summary }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn context(&self, context: Symbol) -> Option<&Result<ContextCode>> {
        self.alphabet.index_of(context).map(|idx| &self.contexts[idx])
    }

    /// Table for `context`, `None` if the context has no code.
    pub fn table(&self, context: Symbol) -> Option<&CodeTable> {
        match self.context(context)? {
            Ok(code) => Some(&code.table),
            Err(_) => None,
        }
    }

    /// `(context, outcome)` in alphabet order.
    pub fn contexts(&self) -> impl Iterator<Item = (Symbol, &Result<ContextCode>)> + '_ {
        self.contexts.iter().enumerate().map(|(idx, code)| (self.alphabet.symbol(idx), code))
    }

    pub fn summary(&self) -> &ConditionalSummary {
        &self.summary
    }

    /// Mean entropy over mean average length, `Undefined` with no observed context.
    pub fn efficiency(&self) -> Result<f64> {
        efficiency_of(self.summary.mean_entropy, self.summary.mean_average_length)
    }
}

fn summarize(model: &ConditionalFrequencyModel, contexts: &[Result<ContextCode>]) -> ConditionalSummary {
    let mut observed = 0;
    let (mut entropy_sum, mut length_sum) = (0.0, 0.0);
    let (mut conditional_entropy, mut bits_per_symbol) = (0.0, 0.0);

    for ((ctx, _), code) in model.rows().zip(contexts) {
        let Ok(code) = code else { continue };
        if code.fallback {
            continue;
        }
        let p = model.context_probability(ctx);
        observed += 1;
        entropy_sum += code.metrics.entropy;
        length_sum += code.metrics.average_length;
        conditional_entropy += p * code.metrics.entropy;
        bits_per_symbol += p * code.metrics.average_length;
    }

    let (mean_entropy, mean_average_length) = match observed {
        0 => (0.0, 0.0),
        n => (entropy_sum / n as f64, length_sum / n as f64),
    };
    ConditionalSummary {
        observed_contexts: observed,
        mean_entropy,
        mean_average_length,
        efficiency: efficiency_of(mean_entropy, mean_average_length).ok(),
        conditional_entropy,
        bits_per_symbol,
    }
}

/// Builds per-context codes for every symbol of the model's alphabet.
pub fn build_conditional_code_table(model: &ConditionalFrequencyModel, options: &Options) -> ConditionalCodeTable {
    ConditionalCodeTable::build(model, options)
}

/// Order-1 stream coder. The first symbol uses the order-0 table, every
/// other symbol the table of the symbol before it.
#[derive(Debug, Clone)]
pub struct ContextCoder {
    order0: CodeTable,
    contexts: ConditionalCodeTable,
}

impl ContextCoder {
    pub fn new(order0: CodeTable, contexts: ConditionalCodeTable) -> Self {
        Self { order0, contexts }
    }

    /// Builds both the order-0 and the order-1 codes from `symbols`.
    pub fn train(symbols: &[Symbol], alphabet: &Alphabet, options: &Options) -> Result<Self> {
        let model = FrequencyModel::build(symbols, alphabet)?;
        let (order0, _) = extract_code_table(&build_huffman_tree_with(&model, options.variance)?);
        let conditional = ConditionalFrequencyModel::build(symbols, alphabet)?;
        Ok(Self::new(order0, ConditionalCodeTable::build(&conditional, options)))
    }

    pub fn order0(&self) -> &CodeTable {
        &self.order0
    }

    pub fn contexts(&self) -> &ConditionalCodeTable {
        &self.contexts
    }

    pub fn encode(&self, symbols: &[Symbol]) -> Result<BitSequence> {
        let mut bits = BitSequence::new();
        let Some((&first, _)) = symbols.split_first() else {
            return Ok(bits);
        };
        encode_into(&[first], &self.order0, &mut bits)?;
        for pair in symbols.windows(2) {
            // no code for the context itself
            let table = self.contexts.table(pair[0]).ok_or(Error::SymbolNotInTable(pair[0]))?;
            encode_into(&pair[1..], table, &mut bits)?;
        }
        Ok(bits)
    }

    pub fn decode(&self, bits: &BitSlice<u8, Msb0>, expected_count: usize) -> Result<Vec<Symbol>> {
        let order0 = Decoder::new(&self.order0);
        let decoders: Vec<Option<Decoder>> = self
            .contexts
            .contexts()
            .map(|(_, code)| code.as_ref().ok().map(|code| Decoder::new(&code.table)))
            .collect();

        let mut reader = bits.iter().by_vals();
        let mut out: Vec<Symbol> = Vec::with_capacity(expected_count);
        while out.len() < expected_count {
            let decoder = match out.last() {
                None => Some(&order0),
                Some(&prev) => self
                    .contexts
                    .alphabet()
                    .index_of(prev)
                    .and_then(|idx| decoders[idx].as_ref()),
            };
            let sym = decoder
                .and_then(|decoder| decoder.decode_one(&mut reader))
                .ok_or(Error::MalformedStream { decoded: out.len(), expected: expected_count })?;
            out.push(sym);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::entropy;

    const EPS: f64 = 1e-9;

    fn symbols(text: &str) -> Vec<Symbol> {
        text.chars().collect()
    }

    fn build(text: &str, alphabet: &str, options: Options) -> (ConditionalFrequencyModel, ConditionalCodeTable) {
        let alphabet = Alphabet::new(alphabet.chars()).unwrap();
        let model = ConditionalFrequencyModel::build(&symbols(text), &alphabet).unwrap();
        let table = build_conditional_code_table(&model, &options);
        (model, table)
    }

    #[test]
    fn unobserved_context_is_isolated() {
        // C never precedes anything
        let (_, table) = build("ABABBAAC", "ABC", Options::default());
        assert!(table.table('A').is_some());
        assert!(table.table('B').is_some());
        assert_eq!(table.context('C'), Some(&Err(Error::Undefined("context never observed"))));
        assert_eq!(table.table('C'), None);
        assert_eq!(table.summary().observed_contexts, 2);
    }

    #[test]
    fn fallback_codes_unobserved_contexts() {
        let options = Options::default().with_unobserved(UnobservedContext::FallbackOrder0);
        let (model, table) = build("ABABBAAC", "ABC", options);
        let Some(Ok(code)) = table.context('C') else {
            panic!("fallback context should be coded");
        };
        assert!(code.fallback);
        assert_eq!(code.table.len(), model.successors().support().count());
        // fallback contexts are not part of the means
        assert_eq!(table.summary().observed_contexts, 2);
    }

    #[test]
    fn mean_efficiency_is_ratio_of_means() {
        // A -> {A, C, B}, C -> {A}, B -> {B}
        let (_, table) = build("AACABB", "ABC", Options::default());
        let metrics: Vec<_> = table
            .contexts()
            .filter_map(|(_, code)| code.as_ref().ok())
            .map(|code| code.metrics)
            .collect();
        assert_eq!(metrics.len(), 3);
        let a = table.context('A').unwrap().as_ref().unwrap().metrics;
        assert!((a.entropy - 3f64.log2()).abs() < EPS);

        let n = metrics.len() as f64;
        let mean_entropy = metrics.iter().map(|m| m.entropy).sum::<f64>() / n;
        let mean_length = metrics.iter().map(|m| m.average_length).sum::<f64>() / n;
        let summary = table.summary();
        assert!((summary.mean_entropy - mean_entropy).abs() < EPS);
        assert!((summary.mean_average_length - mean_length).abs() < EPS);
        assert!((table.efficiency().unwrap() - mean_entropy / mean_length * 100.0).abs() < EPS);

        // not the same as averaging the per-context efficiencies
        let naive = metrics.iter().map(|m| m.efficiency.unwrap()).sum::<f64>() / n;
        assert!((summary.efficiency.unwrap() - naive).abs() > 1.0);
    }

    #[test]
    fn conditional_entropy_weights_by_context() {
        let (model, table) = build("AACABB", "ABC", Options::default());
        let summary = table.summary();
        // only context A has a nonzero entropy
        let expected = model.context_probability('A') * 3f64.log2();
        assert!((summary.conditional_entropy - expected).abs() < EPS);
        assert!(summary.conditional_entropy <= entropy(model.successors()) + EPS);
        assert!(summary.bits_per_symbol >= summary.conditional_entropy - EPS);
    }

    #[test]
    fn nothing_observed_is_undefined() {
        let (_, table) = build("A", "AB", Options::default());
        assert_eq!(table.summary().observed_contexts, 0);
        assert_eq!(table.summary().efficiency, None);
        assert!(matches!(table.efficiency(), Err(Error::Undefined(_))));
    }

    #[test]
    fn coder_round_trip() {
        let alphabet = Alphabet::standard();
        let text = symbols("THE THEME OF THE THESIS IS THERMAL THEORY");
        let coder = ContextCoder::train(&text, &alphabet, &Options::default()).unwrap();
        let bits = coder.encode(&text).unwrap();
        assert_eq!(coder.decode(&bits, text.len()).unwrap(), text);

        // order-1 never does worse than order-0 on its own training data
        let order0_bits = crate::entropy_coding::encode(&text, coder.order0()).unwrap();
        assert!(bits.len() <= order0_bits.len());
    }

    #[test]
    fn coder_rejects_unseen_transition() {
        let alphabet = Alphabet::new("ABC".chars()).unwrap();
        let coder = ContextCoder::train(&symbols("ABCAB"), &alphabet, &Options::default()).unwrap();
        // C is never followed by C
        assert_eq!(coder.encode(&symbols("ACC")), Err(Error::SymbolNotInTable('C')));
        assert!(coder.encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn coder_names_the_uncoded_context() {
        let alphabet = Alphabet::new("ABC".chars()).unwrap();
        // B only ends the training text, so it has no context code
        let coder = ContextCoder::train(&symbols("AAB"), &alphabet, &Options::default()).unwrap();
        assert!(coder.contexts().table('B').is_none());
        assert_eq!(coder.encode(&symbols("ABA")), Err(Error::SymbolNotInTable('B')));
    }

    #[test]
    fn coder_truncated_stream() {
        let alphabet = Alphabet::new("AB".chars()).unwrap();
        let text = symbols("AABBAB");
        let coder = ContextCoder::train(&text, &alphabet, &Options::default()).unwrap();
        let bits = coder.encode(&text).unwrap();
        let cut = &bits[..bits.len() - 1];
        assert!(matches!(
            coder.decode(cut, text.len()),
            Err(Error::MalformedStream { expected: 6, .. })
        ));
    }
}
