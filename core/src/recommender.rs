use crate::config::RecommenderConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::normalize::normalize;
use crate::posting::Posting;
use crate::skills::SkillMatcher;
use crate::vectorizer::TfidfVectorizer;
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked posting with its skill overlap against the resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub posting: &'a Posting,
    pub similarity: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl Recommendation<'_> {
    pub fn rounded_similarity(&self) -> f64 {
        (self.similarity * 1000.0).round() / 1000.0
    }
}

/// Ranks a fitted corpus against resume text. Read-only once built, so it can be
/// shared across threads; rebuild by constructing a new one.
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    vectorizer: TfidfVectorizer,
    corpus: Corpus,
}

impl Recommender {
    pub fn new(postings: Vec<Posting>, config: RecommenderConfig) -> Self {
        Self::with_vectorizer(postings, config, TfidfVectorizer::default())
    }

    pub fn with_vectorizer(postings: Vec<Posting>, config: RecommenderConfig, mut vectorizer: TfidfVectorizer) -> Self {
        let corpus = Corpus::build(postings, &mut vectorizer);
        Self { config, vectorizer, corpus }
    }

    pub fn config(&self) -> &RecommenderConfig { &self.config }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn postings(&self) -> &[Posting] { self.corpus.postings() }

    /// Rank postings for `resume_text`; see [`select`] for the stopping rule.
    /// `None` or a zero `top_k` falls back to the configured default.
    pub fn recommend(
        &self,
        resume_text: &str,
        top_k: Option<usize>,
        min_similarity: Option<f64>,
    ) -> Result<Vec<Recommendation<'_>>> {
        if normalize(resume_text).is_empty() {
            return Ok(Vec::new());
        }
        let k = top_k.filter(|&k| k > 0).unwrap_or(self.config.top_k);
        let threshold = min_similarity.unwrap_or(self.config.min_similarity);

        let query = self.vectorizer.transform(&[resume_text])?;
        let scores = self.vectorizer.similarity(query.row(0), self.corpus.matrix());

        let matcher = SkillMatcher::new(resume_text);
        let results: Vec<Recommendation<'_>> = select(&scores, k, threshold)
            .into_iter()
            .map(|idx| {
                let posting = &self.corpus.postings()[idx];
                let (matched_skills, missing_skills) = matcher.overlap(posting);
                Recommendation { posting, similarity: scores[idx], matched_skills, missing_skills }
            })
            .collect();
        tracing::debug!(k, threshold, candidates = scores.len(), returned = results.len(), "ranked resume");
        Ok(results)
    }
}

/// Indices to return, best first. Ties keep corpus order.
///
/// The walk stops at the first candidate scoring below `min_similarity` once
/// `top_k` results have been collected: the first `top_k` candidates are always
/// kept, later ones only while they meet the threshold.
pub fn select(scores: &[f64], top_k: usize, min_similarity: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut picked = Vec::new();
    for idx in order {
        if picked.len() >= top_k && scores[idx] < min_similarity {
            break;
        }
        picked.push(idx);
    }
    picked
}
