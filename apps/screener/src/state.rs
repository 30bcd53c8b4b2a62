use std::sync::Arc;

use crate::config::Config;
use crate::conversation::ConversationStrategy;
use crate::scoring::RelevanceScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; no per-user or per-session data lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable relevance scorer. Default: LexicalScorer. Swap via SCORER.
    pub scorer: Arc<dyn RelevanceScorer>,
    /// Pluggable chat strategy. Default: ScriptedInterview. Swap via CHAT_MODE.
    pub chat: Arc<dyn ConversationStrategy>,
}
