pub type Column = u32;

/// Borrowed view of one sparse row; `indices` are strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [Column],
    pub values: &'a [f64],
}

impl<'a> SparseRow<'a> {
    pub fn nnz(&self) -> usize { self.indices.len() }

    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Merge-join over the two sorted index lists.
    pub fn dot(&self, other: &SparseRow<'_>) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// Cosine similarity; zero when either side has no weight.
pub fn cosine(a: &SparseRow<'_>, b: &SparseRow<'_>) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 { return 0.0; }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Compressed sparse row matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<Column>,
    data: Vec<f64>,
}

impl SparseMatrix {
    pub fn with_columns(n_cols: usize) -> Self {
        Self { n_cols, indptr: vec![0], indices: Vec::new(), data: Vec::new() }
    }

    /// Append a row. Entries are sorted by column; zero weights are dropped.
    pub fn push_row(&mut self, mut entries: Vec<(Column, f64)>) {
        if self.indptr.is_empty() { self.indptr.push(0); }
        entries.sort_by_key(|(c, _)| *c);
        for (col, weight) in entries {
            debug_assert!((col as usize) < self.n_cols, "column out of range");
            if weight == 0.0 { continue; }
            self.indices.push(col);
            self.data.push(weight);
        }
        self.indptr.push(self.indices.len());
    }

    pub fn rows(&self) -> usize { self.indptr.len().saturating_sub(1) }

    pub fn cols(&self) -> usize { self.n_cols }

    pub fn nnz(&self) -> usize { self.indices.len() }

    pub fn row(&self, i: usize) -> SparseRow<'_> {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        SparseRow { indices: &self.indices[start..end], values: &self.data[start..end] }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = SparseRow<'_>> + '_ {
        (0..self.rows()).map(move |i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sorted_and_sparse() {
        let mut m = SparseMatrix::with_columns(4);
        m.push_row(vec![(3, 1.0), (0, 2.0), (1, 0.0)]);
        m.push_row(vec![]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.row(0).indices, &[0, 3]);
        assert!(m.row(1).is_empty());
    }

    #[test]
    fn cosine_of_disjoint_and_empty_rows_is_zero() {
        let mut m = SparseMatrix::with_columns(3);
        m.push_row(vec![(0, 1.0)]);
        m.push_row(vec![(2, 5.0)]);
        m.push_row(vec![]);
        assert_eq!(cosine(&m.row(0), &m.row(1)), 0.0);
        assert_eq!(cosine(&m.row(2), &m.row(2)), 0.0);
        assert!((cosine(&m.row(0), &m.row(0)) - 1.0).abs() < 1e-12);
    }
}
