// Hybrid retrieval engine: record store, lexical index, similarity scoring, ranking.
// Pure and synchronous: no network or LLM calls in this module.

pub mod corpus;
pub mod keyword;
pub mod lexical;
pub mod ranker;
pub mod scorer;
pub mod similarity;
pub mod store;

pub use corpus::Corpus;
pub use ranker::rank;
pub use scorer::{RankingQuery, ScoringBackend};
