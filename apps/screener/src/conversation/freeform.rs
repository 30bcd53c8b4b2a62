//! Free-form Q&A over the candidate table. Stateless: every turn sends the
//! question plus the whole table, rendered as text, to the external service.

use async_trait::async_trait;
use tracing::warn;

use super::prompts::free_form_prompt;
use super::{ChatMode, ChatReply, ChatRequest, ConversationError, ConversationStrategy};
use crate::llm_client::LlmClient;
use crate::screening::pipeline::render_table;

pub const CHAT_FAILURE_MESSAGE: &str = "Chat service unavailable. Please try again later.";

pub struct FreeFormChat {
    llm: LlmClient,
}

impl FreeFormChat {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ConversationStrategy for FreeFormChat {
    fn mode(&self) -> ChatMode {
        ChatMode::FreeForm
    }

    async fn respond(&self, request: ChatRequest) -> Result<ChatReply, ConversationError> {
        let question = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ConversationError::Validation("message cannot be empty".to_string()))?;

        let context = render_table(&request.candidates);
        let prompt = free_form_prompt(question, &context);

        let answer = match self.llm.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Free-form chat call failed: {e}");
                CHAT_FAILURE_MESSAGE.to_string()
            }
        };

        Ok(ChatReply::FreeForm { answer })
    }
}
