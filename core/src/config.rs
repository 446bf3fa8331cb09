pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.05;
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Ranking defaults used when a caller does not override them per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    pub top_k: usize,
    pub min_similarity: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, min_similarity: DEFAULT_MIN_SIMILARITY }
    }
}

/// Shape of the learned vector space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Keep at most this many terms; `None` keeps the full vocabulary.
    pub max_features: Option<usize>,
    /// Inclusive word n-gram range.
    pub ngram_range: (usize, usize),
    pub stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { max_features: Some(DEFAULT_MAX_FEATURES), ngram_range: (1, 2), stop_words: true }
    }
}
