//! Literal input/output vectors for the public pipeline.

use sparse_vectorizer::{
    analyze, analyze_many, count, count_many, filter_stop_words, normalize, normalize_many,
    Analyzer, Bm25Vectorizer, CborPersist, CountVectorizer, KeywordMatch, KeywordProcessor,
    NgramRange, StopWords, TfIdfVectorizer, VectorizerConfig,
};

fn range(min: usize, max: usize) -> NgramRange {
    NgramRange::new(min, max).unwrap()
}

fn sorted(text: &str, config: &VectorizerConfig) -> Vec<(String, u64)> {
    count(text, config).sorted_dict_order_vector()
}

fn pairs(items: &[&str]) -> Vec<(String, u64)> {
    items.iter().map(|t| (t.to_string(), 1)).collect()
}

#[test]
fn normalize_vectors() {
    assert_eq!(normalize("Hello, world!"), "hello world");
    assert_eq!(
        normalize_many(&["Hello, world!", "How are you?"]),
        vec!["hello world", "how are you"]
    );
}

#[test]
fn analyze_vectors() {
    assert_eq!(
        analyze("Hello, world!", &Analyzer::Word(range(1, 1))),
        vec!["Hello,", "world!"]
    );
    assert_eq!(
        analyze("Hello, world!", &Analyzer::CharWb(range(3, 3))),
        vec!["Hel", "ell", "llo", "lo,", "o, ", ", w", " wo", "wor", "orl", "rld", "ld!"]
    );
    assert_eq!(
        analyze_many(&["hello, world", "good"], &Analyzer::Char(range(2, 3))),
        vec![
            vec![
                "he", "el", "ll", "lo", "o,", ", ", " w", "wo", "or", "rl", "ld", "hel", "ell",
                "llo", "lo,", "o, ", ", w", " wo", "wor", "orl", "rld",
            ],
            vec!["go", "oo", "od", "goo", "ood"],
        ]
    );
}

#[test]
fn count_vectors() {
    let config = VectorizerConfig::default();
    assert_eq!(sorted("Hello, world!", &config), pairs(&["hello", "world"]));

    let raw_bigrams = VectorizerConfig::new(Analyzer::Word(range(2, 2))).with_normalize(false);
    assert_eq!(sorted("Hello, world!", &raw_bigrams), pairs(&["Hello, world!"]));

    let with_stop_words = VectorizerConfig::default().with_stop_words(["are", "you"]);
    let counts: Vec<_> = count_many(&["Hello, world!", "How are you?"], &with_stop_words)
        .into_iter()
        .map(|freq| freq.sorted_dict_order_vector())
        .collect();
    assert_eq!(counts, vec![pairs(&["hello", "world"]), pairs(&["how"])]);
}

#[test]
fn char_count_vectors() {
    let expected = pairs(&[
        " wo", " wor", " worl", " world", "ell", "ello", "ello ", "ello w", "ello wo", "hel",
        "hell", "hello", "hello ", "hello w", "llo", "llo ", "llo w", "llo wo", "llo wor", "lo ",
        "lo w", "lo wo", "lo wor", "lo worl", "o w", "o wo", "o wor", "o worl", "o world", "orl",
        "orld", "rld", "wor", "worl", "world",
    ]);
    let char_wb = VectorizerConfig::new(Analyzer::CharWb(range(3, 7)));
    assert_eq!(sorted("Hello, world!", &char_wb), expected);
    let char = VectorizerConfig::new(Analyzer::Char(range(3, 7)));
    assert_eq!(sorted("Hello, world!", &char), expected);
}

#[test]
fn text_level_stop_words_before_char_counts() {
    let stop_words: StopWords = ["hello"].into_iter().collect();
    let config = VectorizerConfig::new(Analyzer::Char(range(3, 7)));
    let out: Vec<_> = ["Hello, world!", "hello"]
        .iter()
        .map(|text| sorted(&filter_stop_words(&normalize(text), &stop_words), &config))
        .collect();
    assert_eq!(
        out,
        vec![pairs(&["orl", "orld", "rld", "wor", "worl", "world"]), vec![]]
    );
}

#[test]
fn count_vectorizer_vectors() {
    let docs = ["Hello, world!", "How are you?"];
    let mut vectorizer = CountVectorizer::new(VectorizerConfig::default());
    vectorizer.fit(&docs);
    let matrix = vectorizer.transform(&docs).unwrap();
    assert_eq!(matrix.shape, (2, 5));
    assert_eq!(matrix.to_dense(), vec![vec![1, 1, 0, 0, 0], vec![0, 0, 1, 1, 1]]);
    assert_eq!(vectorizer.vocabulary().len(), 5);
    assert_eq!(vectorizer.fit_transform(&docs).shape, (2, 5));
}

#[test]
fn weighted_vectorizer_vectors() {
    let docs = ["Hello, world!", "How are you?"];
    let mut tfidf = TfIdfVectorizer::default();
    tfidf.fit(&docs);
    assert_eq!(tfidf.transform(&docs).unwrap().shape, (2, 5));
    assert_eq!(tfidf.vocabulary().len(), 5);

    let mut bm25 = Bm25Vectorizer::default();
    let matrix = bm25.fit_transform(&docs).unwrap();
    assert_eq!(matrix.shape, (2, 5));
    // every token appears once in one document, so each row spreads its weight evenly
    let dense = matrix.to_dense();
    assert!((dense[0][0] - 0.5f64.sqrt()).abs() < 1e-9);
    assert!((dense[1][2] - (1.0f64 / 3.0).sqrt()).abs() < 1e-9);
}

#[test]
fn out_of_vocabulary_tokens_are_dropped() {
    let mut vectorizer = CountVectorizer::default();
    vectorizer.fit(&["a b"]);
    let matrix = vectorizer.transform(&["a c"]).unwrap();
    assert_eq!(matrix.nnz(), 1);
    assert_eq!(matrix.to_dense(), vec![vec![1, 0]]);
}

#[test]
fn keyword_vectors() {
    let mut processor = KeywordProcessor::new(true, true);
    processor.add_keywords(["hello", "world"]);
    let out: Vec<Vec<(String, usize, usize)>> = processor
        .extract_many(&["Hello, world!", "world", "hello"])
        .into_iter()
        .map(|matches| matches.into_iter().map(Into::into).collect())
        .collect();
    assert_eq!(
        out,
        vec![
            vec![("hello".to_string(), 0, 5), ("world".to_string(), 7, 12)],
            vec![("world".to_string(), 0, 5)],
            vec![("hello".to_string(), 0, 5)],
        ]
    );

    let restored = KeywordProcessor::from_bytes(&processor.to_bytes().unwrap()).unwrap();
    assert_eq!(
        restored.extract("HELLO"),
        vec![KeywordMatch::new("hello", 0, 5)]
    );
}
