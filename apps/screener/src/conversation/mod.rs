// Conversation Driver: a side channel over the aggregated screening results.
// Two interchangeable strategies behind `ConversationStrategy`, chosen at startup via CHAT_MODE:
// scripted interview (local state machine) and free-form Q&A (external service).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmClient;
use crate::screening::models::CandidateRecord;

pub mod freeform;
pub mod handlers;
pub mod prompts;
pub mod scripted;

pub use freeform::FreeFormChat;
pub use scripted::{ConversationState, ScreeningOutcome, ScriptedInterview};

/// One chat turn. Everything the driver needs travels with the request;
/// nothing is kept server-side between turns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// Answer (scripted) or question (free-form).
    #[serde(default)]
    pub message: Option<String>,
    /// Scripted only. Absent on the first turn.
    #[serde(default)]
    pub state: Option<ConversationState>,
    /// Scripted only. Seeds a fresh interview; must be on [0, 1]
    /// (the `relevance` column of a screening report).
    #[serde(default)]
    pub relevance: Option<f64>,
    /// Free-form only. The aggregated table the question is asked about.
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChatReply {
    Scripted {
        state: ConversationState,
        /// Next question to ask, `None` once the interview is over.
        question: Option<String>,
        outcome: Option<ScreeningOutcome>,
    },
    FreeForm {
        answer: String,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConversationError {
    #[error("{0}")]
    Validation(String),

    #[error("Screening interview already finished after {0} questions")]
    Finished(usize),

    #[error("Conversation state is inconsistent: question {index} with {answers} answers")]
    Inconsistent { index: usize, answers: usize },
}

#[async_trait]
pub trait ConversationStrategy: Send + Sync {
    fn mode(&self) -> ChatMode;

    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, ConversationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Scripted,
    FreeForm,
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "scripted" => Ok(ChatMode::Scripted),
            "free_form" | "freeform" => Ok(ChatMode::FreeForm),
            other => Err(format!(
                "unknown chat mode '{other}' (expected 'scripted' or 'free_form')"
            )),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Scripted => f.write_str("scripted"),
            ChatMode::FreeForm => f.write_str("free_form"),
        }
    }
}

pub fn build_strategy(mode: ChatMode, llm: LlmClient) -> Arc<dyn ConversationStrategy> {
    match mode {
        ChatMode::Scripted => Arc::new(ScriptedInterview),
        ChatMode::FreeForm => Arc::new(FreeFormChat::new(llm)),
    }
}
