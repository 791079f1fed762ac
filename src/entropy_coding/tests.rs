use super::*;
use crate::alphabet::Alphabet;
use crate::metrics::{average_length, efficiency, entropy, length_variance};
use crate::models::{build_frequency_model, FrequencyModel};

const EPS: f64 = 1e-9;

fn from_counts(alphabet: &str, counts: &[u64]) -> FrequencyModel {
    let alphabet = Alphabet::new(alphabet.chars()).unwrap();
    FrequencyModel::from_counts(&alphabet, counts.to_vec()).unwrap()
}

#[test]
fn dyadic_distribution_is_optimal() {
    // A: 0.5, B: 0.25, C: 0.125, D: 0.125
    let model = from_counts("ABCD", &[4, 2, 1, 1]);
    let (table, avg) = extract_code_table(&build_huffman_tree(&model).unwrap());

    let codes: Vec<_> = table.iter().map(|(s, code)| (s, bits_to_string(code))).collect();
    assert_eq!(
        codes,
        [
            ('A', String::from("0")),
            ('B', String::from("10")),
            ('C', String::from("110")),
            ('D', String::from("111"))
        ]
    );
    assert!((avg - 1.75).abs() < EPS);
    assert!((average_length(&model, &table).unwrap() - 1.75).abs() < EPS);
    assert!((entropy(&model) - 1.75).abs() < EPS);
    assert!((efficiency(&model, &table).unwrap() - 100.0).abs() < EPS);
}

#[test]
fn single_symbol_stream() {
    let alphabet = Alphabet::new("A".chars()).unwrap();
    let symbols = ['A'; 5];
    let model = build_frequency_model(&symbols, &alphabet).unwrap();
    let (table, avg) = extract_code_table(&build_huffman_tree(&model).unwrap());

    assert_eq!(table.code_len('A'), Some(1));
    assert_eq!(avg, 1.0);
    assert_eq!(entropy(&model), 0.0);
    assert_eq!(efficiency(&model, &table).unwrap(), 0.0);

    let bits = encode(&symbols, &table).unwrap();
    assert_eq!(bits.len(), 5);
    assert_eq!(decode(&bits, &table, 5).unwrap(), symbols);
}

#[test]
fn text_round_trip() {
    let alphabet = Alphabet::standard();
    let symbols: Vec<_> = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG 1234567890".chars().collect();
    let model = build_frequency_model(&symbols, &alphabet).unwrap();
    let (table, avg) = extract_code_table(&build_huffman_tree(&model).unwrap());

    let bits = encode(&symbols, &table).unwrap();
    let expected_bits = avg * symbols.len() as f64;
    assert!((bits.len() as f64 - expected_bits).abs() < 1e-6);
    assert_eq!(decode(&bits, &table, symbols.len()).unwrap(), symbols);
    assert!(avg >= entropy(&model) - EPS);
    assert!(avg < entropy(&model) + 1.0);
}

#[test]
fn variance_policies_agree_on_average_length() {
    // the merged (B, C) node ties with the leaves A and D
    let model = from_counts("ABCD", &[2, 1, 1, 2]);
    let (min_table, min_avg) =
        extract_code_table(&build_huffman_tree_with(&model, VariancePolicy::Min).unwrap());
    let (max_table, max_avg) =
        extract_code_table(&build_huffman_tree_with(&model, VariancePolicy::Max).unwrap());

    assert!((min_avg - max_avg).abs() < EPS);
    let min_var = length_variance(&model, &min_table).unwrap();
    let max_var = length_variance(&model, &max_table).unwrap();
    assert!(min_var < EPS);
    assert!(min_var < max_var);
    assert_eq!(min_table.max_len(), 2);
    assert_eq!(max_table.max_len(), 3);
}

#[test]
fn decoding_with_another_table_fails_or_differs() {
    let symbols: Vec<_> = "ABBCCCDDDD".chars().collect();
    let alphabet = Alphabet::new("ABCD".chars()).unwrap();
    let model = build_frequency_model(&symbols, &alphabet).unwrap();
    let (table, _) = extract_code_table(&build_huffman_tree(&model).unwrap());
    let bits = encode(&symbols, &table).unwrap();

    let other = from_counts("ABCD", &[1, 0, 0, 1]);
    let (other_table, _) = extract_code_table(&build_huffman_tree(&other).unwrap());
    match decode(&bits, &other_table, symbols.len()) {
        Ok(decoded) => assert_ne!(decoded, symbols),
        Err(err) => assert!(matches!(err, crate::error::Error::MalformedStream { .. })),
    }
}
