//! External-judge scorer: asks the text-generation service to rate the fit.
//!
//! Reply contract: a `SCORE: <integer>` line and a `REASON: <text>` line.
//! - transport failure → score 0, `SCORING_FAILURE_REASON`
//! - `SCORE:` missing or unparsable → score 0
//! - `REASON:` missing or blank → `MISSING_REASON`
//! Scores above 100 are clamped, however many digits they have.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::prompts::judge_prompt;
use super::{RelevanceScorer, ScoreResult, ScoreScale};
use crate::llm_client::LlmClient;

pub const SCORING_FAILURE_REASON: &str =
    "Scoring service unavailable; candidate could not be evaluated.";
pub const MISSING_REASON: &str = "No reason provided.";

static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SCORE:\s*(\d+)").expect("score pattern is valid"));
static REASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"REASON:[ \t]*(.*)").expect("reason pattern is valid"));

pub struct JudgeScorer {
    llm: LlmClient,
}

impl JudgeScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RelevanceScorer for JudgeScorer {
    async fn score(&self, resume_text: &str, jd_text: &str) -> ScoreResult {
        let prompt = judge_prompt(jd_text, resume_text);

        let (score, reason) = match self.llm.generate(&prompt).await {
            Ok(reply) => parse_judge_reply(&reply),
            Err(e) => {
                warn!("Judge scoring failed, falling back to zero score: {e}");
                (0, SCORING_FAILURE_REASON.to_string())
            }
        };

        ScoreResult {
            score: f64::from(score),
            scale: ScoreScale::Percent,
            reason: Some(reason),
            backend: self.backend().to_string(),
        }
    }

    fn backend(&self) -> &'static str {
        "judge"
    }

    fn scale(&self) -> ScoreScale {
        ScoreScale::Percent
    }
}

/// Pulls `(score, reason)` out of a judge reply. Never fails.
pub fn parse_judge_reply(reply: &str) -> (u32, String) {
    let score = SCORE_RE
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| saturate_score(m.as_str()));

    if score.is_none() {
        warn!("Judge reply had no usable SCORE line");
    }

    let reason = REASON_RE
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|r| !r.is_empty())
        .unwrap_or(MISSING_REASON)
        .to_string();

    (score.unwrap_or(0), reason)
}

/// `digits` is a non-empty ASCII digit run; anything past `u32` still means "above 100".
fn saturate_score(digits: &str) -> u32 {
    digits.parse::<u32>().map_or(100, |s| s.min(100))
}
