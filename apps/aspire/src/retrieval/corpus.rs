use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::Document;
use crate::retrieval::lexical::LexicalIndex;
use crate::retrieval::store::{DataLoadError, RecordCollection};

/// A record collection together with the lexical index derived from it.
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Corpus<T> {
    collection: RecordCollection<T>,
    lexical: LexicalIndex,
}

impl<T: Document> Corpus<T> {
    pub fn new(collection: RecordCollection<T>) -> Self {
        let lexical = LexicalIndex::build(&collection, T::lexical_text);
        debug!(
            "Built lexical index: {} terms over {} records",
            lexical.vocabulary_size(),
            lexical.len()
        );
        Self {
            collection,
            lexical,
        }
    }
}

impl<T: Document + DeserializeOwned> Corpus<T> {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        Ok(Self::new(RecordCollection::from_json_file(path)?))
    }
}

impl<T> Corpus<T> {
    pub fn collection(&self) -> &RecordCollection<T> {
        &self.collection
    }

    pub fn lexical_index(&self) -> &LexicalIndex {
        &self.lexical
    }

    pub fn size(&self) -> usize {
        self.collection.size()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Fails unless query vectors of `expected` length can be scored against
    /// this corpus. An empty corpus accepts any dimension.
    pub fn ensure_query_dim(&self, expected: usize) -> Result<(), DataLoadError> {
        let found = self.collection.embedding_matrix().dim();
        if self.is_empty() || found == expected {
            Ok(())
        } else {
            Err(DataLoadError::QueryDimensionMismatch { expected, found })
        }
    }
}
