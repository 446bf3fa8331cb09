use crate::config::VectorizerConfig;
use crate::error::{MatchError, Result};
use crate::matrix::{cosine, Column, SparseMatrix, SparseRow};
use crate::normalize::analyze;
use std::collections::HashMap;

/// Learned term -> column mapping plus one IDF weight per column.
#[derive(Debug, Clone, Default)]
struct Vocabulary {
    terms: HashMap<String, Column>,
    idf: Vec<f64>,
}

/// TF-IDF model over word unigrams and bigrams of normalized text.
///
/// Weights are raw counts times smoothed IDF `ln((1 + n) / (1 + df)) + 1`, and
/// every row is L2-normalized.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: Option<Vocabulary>,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config, vocabulary: None }
    }

    pub fn config(&self) -> &VectorizerConfig { &self.config }

    pub fn is_fitted(&self) -> bool { self.vocabulary.is_some() }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.as_ref().map_or(0, |v| v.terms.len())
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = (&str, Column)> + '_ {
        self.vocabulary.iter().flat_map(|v| v.terms.iter().map(|(t, c)| (t.as_str(), *c)))
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        let vocab = self.vocabulary.as_ref()?;
        vocab.terms.get(term).map(|&c| vocab.idf[c as usize])
    }

    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> &mut Self {
        self.fit_transform(documents);
        self
    }

    /// Learn the vocabulary from `documents` and return their weighted matrix, one row per document.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> SparseMatrix {
        let counts: Vec<HashMap<String, u32>> = documents.iter().map(|d| self.count_terms(d.as_ref())).collect();

        // document frequency and total corpus count per term
        let mut stats: HashMap<&str, (u32, u64)> = HashMap::new();
        for doc in &counts {
            for (term, &tf) in doc {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += tf as u64;
            }
        }

        let mut ranked: Vec<(&str, u32, u64)> = stats.into_iter().map(|(t, (df, total))| (t, df, total)).collect();
        if let Some(max) = self.config.max_features {
            if ranked.len() > max {
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)).then(a.0.cmp(b.0)));
                ranked.truncate(max);
            }
        }
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        let mut vocab = Vocabulary { terms: HashMap::with_capacity(ranked.len()), idf: Vec::with_capacity(ranked.len()) };
        for (col, (term, df, _)) in ranked.into_iter().enumerate() {
            vocab.terms.insert(term.to_string(), col as Column);
            vocab.idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        tracing::info!(num_docs = documents.len(), num_terms = vocab.terms.len(), "fitted tf-idf vocabulary");
        let matrix = Self::weigh(&vocab, &counts);
        self.vocabulary = Some(vocab);
        matrix
    }

    /// Project unseen text into the learned space; unknown terms carry no weight.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<SparseMatrix> {
        let vocab = self
            .vocabulary
            .as_ref()
            .ok_or_else(|| MatchError::State("vectorizer must be fitted before calling transform()".into()))?;
        let counts: Vec<HashMap<String, u32>> = documents.iter().map(|d| self.count_terms(d.as_ref())).collect();
        Ok(Self::weigh(vocab, &counts))
    }

    /// Cosine similarity of `query` against every row of `corpus`, in row order.
    pub fn similarity(&self, query: SparseRow<'_>, corpus: &SparseMatrix) -> Vec<f64> {
        corpus.iter_rows().map(|row| cosine(&query, &row)).collect()
    }

    fn count_terms(&self, document: &str) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for term in analyze(document, self.config.ngram_range, self.config.stop_words) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }

    fn weigh(vocab: &Vocabulary, counts: &[HashMap<String, u32>]) -> SparseMatrix {
        let mut matrix = SparseMatrix::with_columns(vocab.terms.len());
        for doc in counts {
            let mut entries: Vec<(Column, f64)> = doc
                .iter()
                .filter_map(|(term, &tf)| {
                    let col = *vocab.terms.get(term)?;
                    Some((col, tf as f64 * vocab.idf[col as usize]))
                })
                .collect();
            let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in entries.iter_mut() { *w /= norm; }
            }
            matrix.push_row(entries);
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_before_fit_is_a_state_error() {
        let v = TfidfVectorizer::default();
        assert!(matches!(v.transform(&["rust"]), Err(MatchError::State(_))));
    }

    #[test]
    fn learns_unigrams_and_bigrams_in_alphabetical_columns() {
        let mut v = TfidfVectorizer::default();
        let m = v.fit_transform(&["Machine learning engineer", "Data engineer"]);
        assert_eq!(m.rows(), 2);
        let mut terms: Vec<(&str, Column)> = v.vocabulary().collect();
        terms.sort_by_key(|(_, c)| *c);
        let names: Vec<&str> = terms.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            names,
            vec!["data", "data engineer", "engineer", "learning", "learning engineer", "machine", "machine learning"]
        );
        // shared term is less informative than a rare one
        assert!(v.idf("engineer").unwrap() < v.idf("machine").unwrap());
    }

    #[test]
    fn max_features_keeps_most_frequent_terms() {
        let mut v = TfidfVectorizer::new(VectorizerConfig { max_features: Some(1), ..VectorizerConfig::default() });
        v.fit(&["rust python", "rust golang", "rust"]);
        assert_eq!(v.vocabulary_len(), 1);
        assert!(v.idf("rust").is_some());
    }

    #[test]
    fn rows_are_unit_length() {
        let mut v = TfidfVectorizer::default();
        let m = v.fit_transform(&["kubernetes docker docker", "terraform"]);
        for row in m.iter_rows() {
            assert!((row.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_corpus_fits_to_zero_rows() {
        let mut v = TfidfVectorizer::default();
        let m = v.fit_transform::<&str>(&[]);
        assert_eq!(m.rows(), 0);
        assert!(v.is_fitted());
        let q = v.transform(&["anything at all"]).unwrap();
        assert!(v.similarity(q.row(0), &m).is_empty());
    }

    #[test]
    fn unseen_vocabulary_scores_zero() {
        let mut v = TfidfVectorizer::default();
        let corpus = v.fit_transform(&["backend rust services", "frontend react"]);
        let q = v.transform(&["gardening pottery"]).unwrap();
        assert_eq!(v.similarity(q.row(0), &corpus), vec![0.0, 0.0]);
    }
}
