//! Axum route handlers for the Chat API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::conversation::scripted::SCREENING_QUESTIONS;
use crate::conversation::{ChatMode, ChatReply, ChatRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub mode: ChatMode,
    pub questions: Vec<&'static str>,
}

/// POST /api/v1/chat
///
/// One turn with whichever strategy is configured. The scripted interview
/// returns its updated state; the client sends it back on the next turn.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chat.respond(request).await?;
    Ok(Json(reply))
}

/// GET /api/v1/chat/questions
pub async fn handle_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        mode: state.chat.mode(),
        questions: SCREENING_QUESTIONS.to_vec(),
    })
}
