//! Lexical scorer: TF-IDF vectors over the two-document corpus {resume, JD},
//! compared with cosine similarity.
//!
//! Tokenizer: lowercase, tokens are runs of two or more Unicode word characters.
//! No stemming, no stopwords.
//! Weights: raw term count × smoothed IDF `ln((1 + n) / (1 + df)) + 1`, n = 2,
//! then L2-normalized.

use std::collections::BTreeMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{RelevanceScorer, ScoreResult, ScoreScale};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

const CORPUS_SIZE: f64 = 2.0;

pub struct LexicalScorer;

#[async_trait]
impl RelevanceScorer for LexicalScorer {
    async fn score(&self, resume_text: &str, jd_text: &str) -> ScoreResult {
        ScoreResult {
            score: tfidf_cosine_similarity(resume_text, jd_text),
            scale: ScoreScale::Unit,
            reason: None,
            backend: self.backend().to_string(),
        }
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }

    fn scale(&self) -> ScoreScale {
        ScoreScale::Unit
    }
}

/// Cosine similarity of the TF-IDF vectors of `left` and `right`, in [0, 1].
///
/// Returns 0.0 when either side has no tokens or the two share no term.
/// Ordered maps keep the float summation order identical for (a, b) and (b, a).
pub fn tfidf_cosine_similarity(left: &str, right: &str) -> f64 {
    let left_counts = term_counts(left);
    let right_counts = term_counts(right);

    if left_counts.is_empty() || right_counts.is_empty() {
        return 0.0;
    }
    if !left_counts.keys().any(|t| right_counts.contains_key(t)) {
        return 0.0;
    }

    let idf = |term: &str| {
        let df = [&left_counts, &right_counts]
            .iter()
            .filter(|counts| counts.contains_key(term))
            .count() as f64;
        ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0
    };

    let left_vec = weigh(&left_counts, &idf);
    let right_vec = weigh(&right_counts, &idf);

    let dot: f64 = left_vec
        .iter()
        .filter_map(|(term, w)| right_vec.get(term).map(|v| w * v))
        .sum();
    let norms = l2_norm(&left_vec) * l2_norm(&right_vec);

    if norms == 0.0 {
        return 0.0;
    }
    (dot / norms).clamp(0.0, 1.0)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    TOKEN_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

fn term_counts(text: &str) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn weigh<'a, F>(counts: &'a BTreeMap<String, u32>, idf: &F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&str) -> f64,
{
    counts
        .iter()
        .map(|(term, &tf)| (term.as_str(), tf as f64 * idf(term.as_str())))
        .collect()
}

fn l2_norm(vector: &BTreeMap<&str, f64>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}
