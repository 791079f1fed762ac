use std::io::{Error as IoError, ErrorKind, Result};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use huffstat::{
    build_conditional_code_table, build_conditional_frequency_model, build_frequency_model,
    build_huffman_tree_with, encode, entropy_coding::bits_to_string, extract_code_table, iid_entropy,
    Alphabet, ContextCoder, Metrics, Options, Symbol, UnobservedContext, VariancePolicy,
};

#[derive(Parser, Debug)]
struct Args {
    /// Text file to analyze
    path: PathBuf,
    /// Tie-breaking policy for equal weights
    #[arg(long, value_enum, default_value_t = Variance::Min)]
    variance: Variance,
    /// Policy for contexts that are never followed by a symbol
    #[arg(long, value_enum, default_value_t = Unobserved::Skip)]
    unobserved: Unobserved,
    /// Print the order-0 codewords
    #[arg(long)]
    show_codes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Variance {
    Min,
    Max,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Unobserved {
    Skip,
    Fallback,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = Options::default()
        .with_variance(match args.variance {
            Variance::Min => VariancePolicy::Min,
            Variance::Max => VariancePolicy::Max,
        })
        .with_unobserved(match args.unobserved {
            Unobserved::Skip => UnobservedContext::Skip,
            Unobserved::Fallback => UnobservedContext::FallbackOrder0,
        });

    let text = std::fs::read_to_string(&args.path)?;
    let alphabet = Alphabet::standard();
    let symbols = normalize(&text, &alphabet);

    let timer = Instant::now();
    report(&symbols, &alphabet, &options, args.show_codes).map_err(|err| IoError::new(ErrorKind::InvalidData, err))?;
    println!("[huffstat] {} symbols, took {:?}", symbols.len(), timer.elapsed());
    Ok(())
}

/// Uppercases, folds whitespace runs into one blank and drops the rest.
fn normalize(text: &str, alphabet: &Alphabet) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_uppercase) {
        let sym = if ch.is_whitespace() { ' ' } else { ch };
        if !alphabet.contains(sym) || (sym == ' ' && out.last() == Some(&' ')) {
            continue;
        }
        out.push(sym);
    }
    out
}

fn report(symbols: &[Symbol], alphabet: &Alphabet, options: &Options, show_codes: bool) -> huffstat::Result<()> {
    let model = build_frequency_model(symbols, alphabet)?;
    let (table, _) = extract_code_table(&build_huffman_tree_with(&model, options.variance)?);
    let metrics = Metrics::compute(&model, &table)?;

    println!("[order0] iid entropy: {:.4} bits", iid_entropy(alphabet));
    print_metrics("order0", &metrics);
    if show_codes {
        for (sym, p) in model.probabilities().filter(|&(_, p)| p > 0.0) {
            let code = table.get(sym).map(bits_to_string).unwrap_or_default();
            println!("  {:?} p: {:.5} code: {}", sym, p, code);
        }
    }
    let bits = encode(symbols, &table)?;
    println!("[order0] csize: {} bits (ratio: {:.3})", bits.len(), bits.len() as f64 / (symbols.len() * 8) as f64);

    let conditional = build_conditional_frequency_model(symbols, alphabet)?;
    let contexts = build_conditional_code_table(&conditional, options);
    for (ctx, code) in contexts.contexts() {
        match code {
            Ok(code) if !code.fallback => print_metrics(&format!("ctx {ctx:?}"), &code.metrics),
            Ok(_) => println!("[ctx {ctx:?}] unobserved, fallback code"),
            Err(err) => println!("[ctx {ctx:?}] {err}"),
        }
    }

    let summary = contexts.summary();
    println!(
        "[order1] contexts: {}, mean entropy: {:.4}, mean avglen: {:.4}, efficiency: {}",
        summary.observed_contexts,
        summary.mean_entropy,
        summary.mean_average_length,
        percent(summary.efficiency)
    );
    println!(
        "[order1] H(X|C): {:.4}, bits/symbol: {:.4}",
        summary.conditional_entropy, summary.bits_per_symbol
    );

    let coder = ContextCoder::new(table, contexts);
    let bits = coder.encode(symbols)?;
    println!("[order1] csize: {} bits (ratio: {:.3})", bits.len(), bits.len() as f64 / (symbols.len() * 8) as f64);
    Ok(())
}

fn print_metrics(label: &str, metrics: &Metrics) {
    println!(
        "[{}] entropy: {:.4}, avglen: {:.4}, efficiency: {}, variance: {:.4}",
        label,
        metrics.entropy,
        metrics.average_length,
        percent(metrics.efficiency),
        metrics.length_variance
    );
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.2}%"))
}
