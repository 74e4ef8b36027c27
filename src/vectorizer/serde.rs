use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::flash::KeywordProcessor;
use crate::vectorizer::{builder::SparseMatrixBuilder, CountVectorizer, WeightedVectorizer};

/// Binary persistence of fitted state
/// Encodes with CBOR. A decoded value transforms exactly like the value that was encoded.
pub trait CborPersist: Serialize + DeserializeOwned {
    /// Encode into bytes
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Decode from bytes produced by [`CborPersist::to_bytes`]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

impl CborPersist for SparseMatrixBuilder {}
impl CborPersist for CountVectorizer {}
impl<E> CborPersist for WeightedVectorizer<E> where E: Serialize + DeserializeOwned {}
impl CborPersist for KeywordProcessor {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::vectorizer::{
        analyzer::{Analyzer, NgramRange},
        config::VectorizerConfig,
        Bm25Vectorizer, TfIdfVectorizer,
    };

    const DOCS: [&str; 3] = ["Le café est chaud", "the cafe is hot", "hot hot hot"];

    #[test]
    fn builder_round_trip_keeps_columns() {
        let config = VectorizerConfig::new(Analyzer::CharWb(NgramRange::new(2, 3).unwrap()))
            .with_stop_words(["ho"]);
        let mut builder = SparseMatrixBuilder::new(config);
        builder.fit(&DOCS);

        let restored = SparseMatrixBuilder::from_bytes(&builder.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.config(), builder.config());
        assert_eq!(
            restored.vocabulary().iter().collect::<Vec<_>>(),
            builder.vocabulary().iter().collect::<Vec<_>>()
        );
        assert_eq!(restored.transform(&DOCS).unwrap(), builder.transform(&DOCS).unwrap());
    }

    #[test]
    fn weighted_round_trip_transforms_identically() {
        let mut tfidf = TfIdfVectorizer::default();
        tfidf.fit(&DOCS);
        let restored = TfIdfVectorizer::from_bytes(&tfidf.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.transform(&DOCS).unwrap(), tfidf.transform(&DOCS).unwrap());

        let mut bm25 = Bm25Vectorizer::default();
        bm25.fit(&DOCS);
        let restored = Bm25Vectorizer::from_bytes(&bm25.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.engine(), bm25.engine());
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            CountVectorizer::from_bytes(&[0xff, 0x00, 0x13]),
            Err(Error::Serialization(_))
        ));
    }
}
