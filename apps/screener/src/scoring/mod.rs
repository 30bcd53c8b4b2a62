//! Relevance Scoring: pluggable, trait-based scorer that measures a resume against a job description.
//!
//! Backends:
//! - `LexicalScorer`: TF-IDF + cosine similarity, pure Rust, deterministic, [0, 1].
//! - `JudgeScorer`: delegates to the external text-generation service, [0, 100].
//!
//! `AppState` holds an `Arc<dyn RelevanceScorer>`, chosen at startup via `SCORER`.
//! Scoring never fails: backends fold their own failures into a zero score with
//! an explanatory reason so one bad document cannot sink a batch.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::LlmClient;

pub mod judge;
pub mod lexical;
pub mod prompts;

pub use judge::JudgeScorer;
pub use lexical::LexicalScorer;

/// Range a backend reports its scores in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// [0, 1]
    Unit,
    /// [0, 100]
    Percent,
}

impl ScoreScale {
    pub fn max(self) -> f64 {
        match self {
            ScoreScale::Unit => 1.0,
            ScoreScale::Percent => 100.0,
        }
    }
}

/// Outcome of scoring one (resume, job description) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub scale: ScoreScale,
    pub reason: Option<String>,
    pub backend: String, // "lexical" | "judge"
}

impl ScoreResult {
    /// Score mapped onto [0, 1] regardless of backend.
    pub fn normalized(&self) -> f64 {
        (self.score / self.scale.max()).clamp(0.0, 1.0)
    }
}

/// Implement this to add a scoring backend without touching the pipeline or handlers.
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    async fn score(&self, resume_text: &str, jd_text: &str) -> ScoreResult;

    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;

    fn scale(&self) -> ScoreScale;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorerKind {
    #[default]
    Lexical,
    Judge,
}

impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" | "tfidf" => Ok(ScorerKind::Lexical),
            "judge" | "llm" => Ok(ScorerKind::Judge),
            other => Err(format!(
                "unknown scorer '{other}' (expected 'lexical' or 'judge')"
            )),
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerKind::Lexical => f.write_str("lexical"),
            ScorerKind::Judge => f.write_str("judge"),
        }
    }
}

pub fn build_scorer(kind: ScorerKind, llm: LlmClient) -> Arc<dyn RelevanceScorer> {
    match kind {
        ScorerKind::Lexical => Arc::new(LexicalScorer),
        ScorerKind::Judge => Arc::new(JudgeScorer::new(llm)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{stub_client, StubTransport};

    #[test]
    fn test_normalized_percent() {
        let result = ScoreResult {
            score: 85.0,
            scale: ScoreScale::Percent,
            reason: None,
            backend: "judge".to_string(),
        };
        assert!((result.normalized() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_unit_is_identity() {
        let result = ScoreResult {
            score: 0.42,
            scale: ScoreScale::Unit,
            reason: None,
            backend: "lexical".to_string(),
        };
        assert_eq!(result.normalized(), 0.42);
    }

    #[test]
    fn test_scorer_kind_parsing() {
        assert_eq!("lexical".parse::<ScorerKind>().unwrap(), ScorerKind::Lexical);
        assert_eq!(" Judge ".parse::<ScorerKind>().unwrap(), ScorerKind::Judge);
        assert_eq!("llm".parse::<ScorerKind>().unwrap(), ScorerKind::Judge);
        assert!("bert".parse::<ScorerKind>().is_err());
    }

    #[test]
    fn test_build_scorer_selects_backend() {
        let llm = stub_client(StubTransport::replying("SCORE: 1"));
        assert_eq!(build_scorer(ScorerKind::Lexical, llm.clone()).backend(), "lexical");
        assert_eq!(build_scorer(ScorerKind::Judge, llm).backend(), "judge");
    }

    #[test]
    fn test_score_scale_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ScoreScale::Percent).unwrap(), "\"percent\"");
    }
}
