use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resume::fields::ParsedResume;
use crate::scoring::{ScoreResult, ScoreScale};

/// One uploaded file, as received.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub bytes: Bytes,
}

/// Flat per-candidate row for tables and export.
///
/// Multi-valued parsed fields are reduced to their first match ("first match
/// wins"); the full lists stay available in `RankedCandidate::details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// In the scale of the scorer that produced it.
    pub score: f64,
    /// `score` mapped onto [0, 1]. This is the value a scripted interview takes as `relevance`.
    #[serde(default)]
    pub relevance: f64,
    pub skills: String,
    pub reason: String,
}

impl CandidateRecord {
    pub fn new(filename: impl Into<String>, parsed: &ParsedResume, score: &ScoreResult) -> Self {
        Self {
            filename: filename.into(),
            name: parsed.name.clone(),
            email: first_or_empty(&parsed.email),
            phone: first_or_empty(&parsed.phone),
            score: score.score,
            relevance: score.normalized(),
            skills: first_or_empty(&parsed.skills),
            reason: score.reason.clone().unwrap_or_default(),
        }
    }
}

fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

/// A scored candidate before ranking.
#[derive(Debug, Clone)]
pub struct ScreenedCandidate {
    pub record: CandidateRecord,
    pub details: ParsedResume,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    /// 1-based position after sorting.
    pub rank: usize,
    pub is_top: bool,
    #[serde(flatten)]
    pub record: CandidateRecord,
    pub details: ParsedResume,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub screening_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub scorer: String,
    pub score_scale: ScoreScale,
    /// Absent when no candidate was screened.
    pub top_score: Option<f64>,
    pub candidates: Vec<RankedCandidate>,
}
