//! Chat-based math tutor.
//!
//! The conversation is an explicit append-only message log owned by the UI;
//! each turn ships a snapshot of that log plus the new message to a
//! background worker, which calls the hosted model and sends the reply (or
//! a terminal error message) back over a channel. At most one turn is in
//! flight at a time; the UI disables sending while it waits. Absence of
//! the API credential disables the feature with an explanatory message
//! instead of failing.

mod client;

pub use client::TutorClient;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::TutorConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

pub const GREETING: &str =
    "Hello! I'm your friendly math tutor. Ask me anything about trigonometry or the unit circle!";

pub const UNAVAILABLE: &str = "Sorry, the Math Tutor is currently unavailable. \
    Set GEMINI_API_KEY in your environment to enable it.";

pub const REQUEST_FAILED: &str = "Sorry, I couldn't get a response. \
    Please check your connection or API key and try again.";

/// One conversation turn: the log so far plus the new user message.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// Sent from the worker back to the UI: the assistant's reply, or a
/// terminal failure notice the UI appends to the conversation as-is.
#[derive(Debug, Clone)]
pub enum TutorEvent {
    Reply(String),
    Failed(String),
}

/// UI-side handle to the tutor worker. `None` channels mean degraded mode.
pub struct TutorHandle {
    turn_tx: Option<mpsc::Sender<TurnRequest>>,
    event_rx: Option<mpsc::Receiver<TutorEvent>>,
}

impl TutorHandle {
    /// An inert handle: every send fails, every poll is empty.
    pub fn disabled() -> Self {
        Self {
            turn_tx: None,
            event_rx: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.turn_tx.is_some()
    }

    /// Queue a turn. Returns false if the tutor is disabled or the worker
    /// is gone; the caller then shows the unavailable notice.
    pub fn send(&self, request: TurnRequest) -> bool {
        match &self.turn_tx {
            Some(tx) => tx.try_send(request).is_ok(),
            None => false,
        }
    }

    /// Non-blocking poll for a finished turn.
    pub fn poll(&mut self) -> Option<TutorEvent> {
        self.event_rx.as_mut()?.try_recv().ok()
    }
}

/// Start the tutor worker task. Without a credential the returned handle is
/// inert and the caller renders the degraded-mode message.
pub fn start(config: &TutorConfig) -> TutorHandle {
    let Some(client) = TutorClient::from_env(&config.model) else {
        debug!("GEMINI_API_KEY not set; tutor disabled");
        return TutorHandle::disabled();
    };

    // Capacity 1: the UI never queues a second turn while one is pending.
    let (turn_tx, mut turn_rx) = mpsc::channel::<TurnRequest>(1);
    let (event_tx, event_rx) = mpsc::channel::<TutorEvent>(1);

    tokio::spawn(async move {
        while let Some(request) = turn_rx.recv().await {
            let event = match client.send_turn(&request.history, &request.message).await {
                Ok(text) => TutorEvent::Reply(text),
                Err(e) => {
                    warn!("Tutor request failed: {}", e);
                    TutorEvent::Failed(REQUEST_FAILED.to_string())
                }
            };
            if event_tx.send(event).await.is_err() {
                break;
            }
        }
    });

    TutorHandle {
        turn_tx: Some(turn_tx),
        event_rx: Some(event_rx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_handle_rejects_sends() {
        let mut handle = TutorHandle::disabled();
        assert!(!handle.is_enabled());
        assert!(!handle.send(TurnRequest {
            history: Vec::new(),
            message: "what is sine?".to_string(),
        }));
        assert!(handle.poll().is_none());
    }

    #[test]
    fn message_constructors_tag_the_role() {
        assert_eq!(ChatMessage::user("hi").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
    }
}
