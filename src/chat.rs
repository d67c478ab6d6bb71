//! UI-agnostic conversation state and the request lifecycle.
//!
//! The controller owns the transcript, the loading flag, the banner error
//! and the draft input. The UI layer reads them through the accessors and
//! mutates only through `set_draft` / `submit`; request outcomes are folded
//! back in by `poll` from the event loop.

use tokio::task::JoinHandle;

use crate::client::{FittingClient, Recommendation};
use crate::error::SubmitError;
use crate::validate::validate_query;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One chat bubble. Entries are never edited once appended; the transcript
/// only grows, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Set only on assistant entries for a failed exchange; mutually
    /// exclusive with the structured fields below.
    pub error_text: Option<String>,
    pub reasoning: Option<String>,
    pub fit_tips: Option<String>,
    pub issues: Option<Vec<String>>,
    pub confidence: Option<f64>,
}

impl ChatMessage {
    fn user(text: String) -> Self {
        Self {
            role: ChatRole::User,
            text,
            error_text: None,
            reasoning: None,
            fit_tips: None,
            issues: None,
            confidence: None,
        }
    }

    fn assistant(reply: Recommendation) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: reply.recommendation,
            error_text: None,
            reasoning: reply.reasoning,
            fit_tips: reply.fit_tips,
            issues: reply.identified_issues,
            confidence: reply.confidence,
        }
    }

    fn assistant_error(message: String) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: String::new(),
            error_text: Some(message),
            reasoning: None,
            fit_tips: None,
            issues: None,
            confidence: None,
        }
    }
}

struct Pending {
    /// The text the request was dispatched with, kept so the user entry can
    /// be appended once the outcome is known.
    text: String,
    task: JoinHandle<Result<Recommendation, SubmitError>>,
}

pub struct ChatController {
    client: FittingClient,
    transcript: Vec<ChatMessage>,
    draft: String,
    loading: bool,
    last_error: Option<String>,
    pending: Option<Pending>,
}

impl ChatController {
    pub fn new(client: FittingClient) -> Self {
        Self {
            client,
            transcript: Vec::new(),
            draft: String::new(),
            loading: false,
            last_error: None,
            pending: None,
        }
    }

    // Read-only view for the UI layer.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the uncommitted input text.
    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    /// Validates the draft and, if it passes, dispatches the request with
    /// the exact text the user typed. The single pending slot doubles as a
    /// lock: a submission while one is already in flight is discarded.
    pub fn submit(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if let Err(reason) = validate_query(&self.draft) {
            self.last_error = Some(SubmitError::Validation(reason).to_string());
            return;
        }

        let text = self.draft.clone();
        self.loading = true;
        self.last_error = None;
        tracing::debug!(chars = text.chars().count(), "dispatching fitting request");

        let client = self.client.clone();
        let query = text.clone();
        let task = tokio::spawn(async move { client.recommend(&query).await });
        self.pending = Some(Pending { text, task });
    }

    /// Folds a finished request back into the conversation state. Called on
    /// every tick; does nothing while the request is still in flight.
    /// Returns true when an outcome was applied.
    pub async fn poll(&mut self) -> bool {
        let finished = matches!(&self.pending, Some(pending) if pending.task.is_finished());
        if !finished {
            return false;
        }
        if let Some(Pending { text, task }) = self.pending.take() {
            // A join error means the spawned task died without producing a
            // response; to the user that is indistinguishable from a
            // connection failure.
            let result = task.await.unwrap_or(Err(SubmitError::Network));
            self.finish(text, result);
            return true;
        }
        false
    }

    /// Success and service errors append a user/assistant pair and clear
    /// the draft; transport and parse failures only raise the banner and
    /// leave both the transcript and the draft alone.
    fn finish(&mut self, text: String, result: Result<Recommendation, SubmitError>) {
        self.loading = false;
        match result {
            Ok(reply) => {
                tracing::debug!(confidence = ?reply.confidence, "recommendation received");
                self.transcript.push(ChatMessage::user(text));
                self.transcript.push(ChatMessage::assistant(reply));
                self.draft.clear();
            }
            Err(err) if err.is_banner() => {
                tracing::warn!(error = %err, "fitting request failed");
                self.last_error = Some(err.to_string());
            }
            Err(err) => {
                self.transcript.push(ChatMessage::user(text));
                self.transcript.push(ChatMessage::assistant_error(err.to_string()));
                self.draft.clear();
            }
        }
    }
}
