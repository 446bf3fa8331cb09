use crate::matrix::SparseMatrix;
use crate::posting::Posting;
use crate::vectorizer::TfidfVectorizer;

/// Postings together with their fitted matrix; row `i` belongs to posting `i`.
///
/// There is no way to mutate a built corpus. A new posting list means a new `Corpus`.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    postings: Vec<Posting>,
    matrix: SparseMatrix,
}

impl Corpus {
    /// Fit `vectorizer` on every posting's `full_text` and keep the resulting rows.
    pub fn build(postings: Vec<Posting>, vectorizer: &mut TfidfVectorizer) -> Self {
        let texts: Vec<String> = postings.iter().map(Posting::full_text).collect();
        let matrix = vectorizer.fit_transform(&texts);
        debug_assert_eq!(matrix.rows(), postings.len());
        Self { postings, matrix }
    }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn postings(&self) -> &[Posting] { &self.postings }

    pub fn posting(&self, i: usize) -> Option<&Posting> { self.postings.get(i) }

    pub fn matrix(&self) -> &SparseMatrix { &self.matrix }
}
