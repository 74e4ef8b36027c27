//! Property-based tests using proptest.
//!
//! Invariants that must hold for any input text or corpus.

use proptest::prelude::*;
use sparse_vectorizer::utils::math::row_norms;
use sparse_vectorizer::{
    analyze, count, normalize, Analyzer, Bm25Vectorizer, KeywordProcessor, NgramRange,
    SparseMatrixBuilder, TfIdfVectorizer, VectorizerConfig,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words mixing ASCII, diacritics, punctuation and case
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-zA-Z0-9]{1,8}").unwrap(),
        prop::sample::select(vec![
            "Café".to_string(),
            "naïve".to_string(),
            "résumé".to_string(),
            "Hello,".to_string(),
            "world!".to_string(),
            "e-mail".to_string(),
            "C++".to_string(),
            "ÜBER".to_string(),
        ]),
    ]
}

/// Free text with irregular whitespace
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (word_strategy(), prop::sample::select(vec![" ", "  ", "\t", "\n "])),
        0..12,
    )
    .prop_map(|parts| parts.into_iter().map(|(w, sep)| format!("{w}{sep}")).collect())
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text_strategy(), 1..6)
}

fn analyzer_strategy() -> impl Strategy<Value = Analyzer> {
    (1usize..4, 0usize..3, 0usize..3).prop_map(|(min, span, kind)| {
        let range = NgramRange::new(min, min + span).unwrap();
        match kind {
            0 => Analyzer::Word(range),
            1 => Analyzer::Char(range),
            _ => Analyzer::CharWb(range),
        }
    })
}

fn assert_rows_unit_or_zero(values: &[f64], rows: &[usize], num_rows: usize) {
    for norm in row_norms(values, rows, num_rows) {
        assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9, "row norm {norm}");
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn normalize_is_idempotent(text in text_strategy()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.is_ascii());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn counts_conserve_tokens(text in text_strategy(), analyzer in analyzer_strategy()) {
        let config = VectorizerConfig::new(analyzer.clone());
        let tokens = analyze(&normalize(&text), &analyzer);
        let counts = count(&text, &config);
        prop_assert_eq!(counts.token_sum(), tokens.len() as u64);
        prop_assert_eq!(counts.iter().map(|(_, c)| c).sum::<u64>(), tokens.len() as u64);
    }

    #[test]
    fn fit_is_deterministic(docs in corpus_strategy(), analyzer in analyzer_strategy()) {
        let config = VectorizerConfig::new(analyzer);
        let mut first = SparseMatrixBuilder::new(config.clone());
        let mut second = SparseMatrixBuilder::new(config);
        let a = first.fit_transform(&docs);
        let b = second.fit_transform(&docs);
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.get_vocab(), second.get_vocab());
    }

    #[test]
    fn transform_shape_is_docs_by_vocab(train in corpus_strategy(), test in corpus_strategy()) {
        let mut builder = SparseMatrixBuilder::new(VectorizerConfig::default());
        builder.fit(&train);
        prop_assume!(builder.get_num_cols() > 0);
        let matrix = builder.transform(&test).unwrap();
        prop_assert_eq!(matrix.shape, (test.len(), builder.get_num_cols()));
        prop_assert!(matrix.row_indices.iter().all(|&r| r < test.len()));
        prop_assert!(matrix.column_indices.iter().all(|&c| c < builder.get_num_cols()));
        prop_assert!(matrix.values.iter().all(|&v| v > 0));
    }

    #[test]
    fn fit_then_transform_matches_fit_transform(docs in corpus_strategy()) {
        let mut fused = SparseMatrixBuilder::new(VectorizerConfig::default());
        let expected = fused.fit_transform(&docs);
        let mut fitted = SparseMatrixBuilder::new(VectorizerConfig::default());
        fitted.fit(&docs);
        if fitted.get_num_cols() > 0 {
            prop_assert_eq!(fitted.transform(&docs).unwrap(), expected);
        } else {
            prop_assert_eq!(expected.nnz(), 0);
        }
    }

    #[test]
    fn weighted_rows_are_unit_or_zero(docs in corpus_strategy()) {
        let mut tfidf = TfIdfVectorizer::default();
        let m = tfidf.fit_transform(&docs).unwrap();
        assert_rows_unit_or_zero(&m.values, &m.row_indices, m.shape.0);

        let mut bm25 = Bm25Vectorizer::default();
        let m = bm25.fit_transform(&docs).unwrap();
        assert_rows_unit_or_zero(&m.values, &m.row_indices, m.shape.0);
    }

    #[test]
    fn keyword_matches_are_ordered_and_disjoint(
        keywords in prop::collection::vec(text_strategy(), 1..6),
        text in text_strategy(),
    ) {
        let mut processor = KeywordProcessor::default();
        processor.add_keywords(&keywords);
        let matches = processor.extract(&text);
        let len = text.chars().count();
        let mut last_end = 0;
        for m in &matches {
            prop_assert!(m.start < m.end && m.end <= len);
            prop_assert!(m.start >= last_end);
            last_end = m.end;
        }
    }

    #[test]
    fn added_keyword_is_found_in_itself(keyword in text_strategy()) {
        let mut processor = KeywordProcessor::default();
        if processor.add_keyword(&keyword) {
            let matches = processor.extract(&keyword);
            prop_assert_eq!(matches.len(), 1);
            prop_assert_eq!(matches[0].keyword.as_str(), keyword.as_str());
        }
    }
}
