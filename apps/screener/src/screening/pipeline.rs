//! Batch pipeline: extract → parse → score → rank.
//!
//! Documents are processed one after another. Each one is independent, and
//! every stage degrades instead of failing, so a batch always yields one row
//! per uploaded document.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::resume::extract::extract_text_blocking;
use crate::resume::fields::parse_resume;
use crate::scoring::RelevanceScorer;
use crate::screening::models::{
    CandidateRecord, RankedCandidate, ScreenedCandidate, ScreeningReport, UploadedResume,
};

/// Text already pulled out of one document.
#[derive(Debug, Clone)]
pub struct ExtractedResume {
    pub filename: String,
    pub text: String,
}

/// Runs the full pipeline over uploaded PDFs and returns the ranked report.
pub async fn screen_batch(
    documents: Vec<UploadedResume>,
    jd_text: &str,
    scorer: &dyn RelevanceScorer,
) -> ScreeningReport {
    let mut extracted = Vec::with_capacity(documents.len());
    for document in documents {
        let text = extract_text_blocking(&document.filename, document.bytes).await;
        extracted.push(ExtractedResume {
            filename: document.filename,
            text,
        });
    }
    screen_extracted(extracted, jd_text, scorer).await
}

/// Parses and scores already-extracted resumes, then ranks them.
pub async fn screen_extracted(
    resumes: Vec<ExtractedResume>,
    jd_text: &str,
    scorer: &dyn RelevanceScorer,
) -> ScreeningReport {
    let screening_id = Uuid::new_v4();
    info!(
        %screening_id,
        documents = resumes.len(),
        scorer = scorer.backend(),
        "Screening batch started"
    );

    let mut screened = Vec::with_capacity(resumes.len());
    for resume in resumes {
        screened.push(screen_text(resume, jd_text, scorer).await);
    }

    let candidates = rank_candidates(screened);
    let top_score = top_score(&candidates);

    info!(%screening_id, ?top_score, "Screening batch finished");

    ScreeningReport {
        screening_id,
        generated_at: Utc::now(),
        scorer: scorer.backend().to_string(),
        score_scale: scorer.scale(),
        top_score,
        candidates,
    }
}

async fn screen_text(
    resume: ExtractedResume,
    jd_text: &str,
    scorer: &dyn RelevanceScorer,
) -> ScreenedCandidate {
    let details = parse_resume(&resume.text);
    let score = scorer.score(&resume.text, jd_text).await;

    debug!(
        filename = %resume.filename,
        text_chars = resume.text.len(),
        score = score.score,
        normalized = score.normalized(),
        "Candidate screened"
    );

    ScreenedCandidate {
        record: CandidateRecord::new(resume.filename, &details, &score),
        details,
    }
}

/// Sorts by score, highest first. Ties keep upload order; NaN sorts last.
/// The first row of a non-empty table is marked as top.
pub fn rank_candidates(mut candidates: Vec<ScreenedCandidate>) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| sort_key(b.record.score).total_cmp(&sort_key(a.record.score)));

    candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| RankedCandidate {
            rank: i + 1,
            is_top: i == 0,
            record: c.record,
            details: c.details,
        })
        .collect()
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Highest score in the table, ignoring NaN.
pub fn top_score(candidates: &[RankedCandidate]) -> Option<f64> {
    candidates
        .iter()
        .map(|c| c.record.score)
        .filter(|s| !s.is_nan())
        .reduce(f64::max)
}

const TABLE_COLUMNS: [&str; 7] = [
    "filename", "name", "email", "phone", "score", "skills", "reason",
];

/// Renders records as pipe-separated text: a header row, then one row per candidate.
pub fn render_table(records: &[CandidateRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(TABLE_COLUMNS.join(" | "));

    for r in records {
        let score = r.score.to_string();
        let cells = [
            r.filename.as_str(),
            r.name.as_str(),
            r.email.as_str(),
            r.phone.as_str(),
            score.as_str(),
            r.skills.as_str(),
            r.reason.as_str(),
        ];
        let row: Vec<String> = cells.iter().map(|c| flatten_cell(c)).collect();
        lines.push(row.join(" | "));
    }

    lines.join("\n")
}

/// Keeps one candidate per line.
fn flatten_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}
