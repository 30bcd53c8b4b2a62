//! Scripted screening interview: a linear state machine over a fixed question list.
//!
//! States are question indices `0..=N` (N = number of questions, terminal).
//! Each answer is appended and advances the index by one. No retries, no
//! skipping, no going back. At the terminal state a composite score is computed:
//!
//! `composite = 0.7 × relevance + 0.3 × chat_score`
//!
//! where `chat_score` is the fraction of answers longer than 20 characters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ChatMode, ChatReply, ChatRequest, ConversationError, ConversationStrategy};

pub const SCREENING_QUESTIONS: [&str; 4] = [
    "Tell me briefly about yourself.",
    "What are your top 3 technical skills?",
    "Do you have experience working in teams?",
    "Are you open to relocation?",
];

const LONG_ANSWER_CHARS: usize = 20;
const RELEVANCE_WEIGHT: f64 = 0.7;
const CHAT_WEIGHT: f64 = 0.3;
const SHORTLIST_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Shortlisted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    /// Rounded to two decimals.
    pub composite: f64,
    pub chat_score: f64,
    pub status: CandidateStatus,
}

/// Interview progress. Owned by the caller and passed back in on every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub question_index: usize,
    pub answers: Vec<String>,
    /// Resume relevance in [0, 1], carried into the composite score.
    pub relevance: f64,
}

impl ConversationState {
    /// `relevance` must already be on [0, 1]; see `CandidateRecord::relevance`.
    pub fn new(relevance: f64) -> Result<Self, ConversationError> {
        Ok(Self {
            question_index: 0,
            answers: Vec::new(),
            relevance: check_relevance(relevance)?,
        })
    }

    pub fn current_question(&self) -> Option<&'static str> {
        SCREENING_QUESTIONS.get(self.question_index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.question_index >= SCREENING_QUESTIONS.len()
    }

    /// Records the answer to the current question and moves to the next one.
    pub fn answer(mut self, answer: impl Into<String>) -> Result<Self, ConversationError> {
        if self.is_finished() {
            return Err(ConversationError::Finished(SCREENING_QUESTIONS.len()));
        }
        self.answers.push(answer.into());
        self.question_index += 1;
        Ok(self)
    }

    /// Only available once every question has been answered.
    pub fn outcome(&self) -> Option<ScreeningOutcome> {
        self.is_finished()
            .then(|| calculate_score(self.relevance, &self.answers))
    }

    /// Rejects states a client could not have reached through `answer`.
    pub fn validated(self) -> Result<Self, ConversationError> {
        if self.question_index != self.answers.len()
            || self.question_index > SCREENING_QUESTIONS.len()
        {
            return Err(ConversationError::Inconsistent {
                index: self.question_index,
                answers: self.answers.len(),
            });
        }
        check_relevance(self.relevance)?;
        Ok(self)
    }
}

/// Accepts [0, 1] only; a raw percent score is an error.
fn check_relevance(relevance: f64) -> Result<f64, ConversationError> {
    if (0.0..=1.0).contains(&relevance) {
        Ok(relevance)
    } else {
        Err(ConversationError::Validation(format!(
            "relevance must be between 0 and 1, got {relevance}"
        )))
    }
}

/// Composite of resume relevance and the answer-length heuristic.
pub fn calculate_score(relevance: f64, answers: &[String]) -> ScreeningOutcome {
    let chat_score = if answers.is_empty() {
        0.0
    } else {
        let long = answers
            .iter()
            .filter(|a| a.chars().count() > LONG_ANSWER_CHARS)
            .count();
        long as f64 / answers.len() as f64
    };

    let composite = RELEVANCE_WEIGHT * relevance + CHAT_WEIGHT * chat_score;
    let status = if composite >= SHORTLIST_THRESHOLD {
        CandidateStatus::Shortlisted
    } else {
        CandidateStatus::Rejected
    };

    ScreeningOutcome {
        composite: (composite * 100.0).round() / 100.0,
        chat_score,
        status,
    }
}

pub struct ScriptedInterview;

#[async_trait]
impl ConversationStrategy for ScriptedInterview {
    fn mode(&self) -> ChatMode {
        ChatMode::Scripted
    }

    /// No `message`: report the current question without transitioning.
    /// With `message`: answer the current question.
    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, ConversationError> {
        let state = match request.state {
            Some(state) => state.validated()?,
            None => ConversationState::new(request.relevance.unwrap_or(0.0))?,
        };

        let state = match request.message {
            Some(answer) => state.answer(answer)?,
            None => state,
        };

        let outcome = state.outcome();
        if let Some(outcome) = &outcome {
            info!(
                composite = outcome.composite,
                status = ?outcome.status,
                "Screening interview finished"
            );
        }

        Ok(ChatReply::Scripted {
            question: state.current_question().map(str::to_string),
            outcome,
            state,
        })
    }
}
