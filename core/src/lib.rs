pub mod config;
pub mod corpus;
pub mod error;
pub mod matrix;
pub mod normalize;
pub mod posting;
pub mod recommender;
pub mod skills;
pub mod vectorizer;

pub use config::{RecommenderConfig, VectorizerConfig};
pub use corpus::Corpus;
pub use error::{MatchError, Result};
pub use matrix::{SparseMatrix, SparseRow};
pub use posting::Posting;
pub use recommender::{Recommendation, Recommender};
pub use vectorizer::TfidfVectorizer;
