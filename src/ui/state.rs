//! Application state management
//!
//! This module provides the central state for the Ponder UI: the message
//! log, the animation driver, the transport channels, and the handlers for
//! every user interaction.

use crate::animation::{TurnAnimator, VisualState};
use crate::client::{ChatCommand, ChatEvent, ChatHandle, TurnResponse};
use crate::messages::{MessageStore, Rating};
use tracing::{debug, warn};
use uuid::Uuid;

/// Reply substituted when the turn fetch fails.
pub const FALLBACK_REPLY: &str = "?";

/// Lines typed out when the widget starts.
pub const WELCOME_SCRIPT: [&str; 4] = [
    "we say words back n forth",
    "they have to be kinda related",
    "they can't start with r t or s",
    "u start...",
];

/// Central application state
pub struct AppState {
    /// Message log (thread-safe)
    pub messages: MessageStore,

    /// Current text input
    pub input_text: String,

    /// Whether the next turn runs the thought-process animation
    pub show_thoughts: bool,

    /// Last error message
    pub last_error: Option<String>,

    animator: Option<TurnAnimator>,
    chat: Option<ChatHandle>,

    /// In-flight request and the user message that triggered it
    pending_request: Option<(Uuid, Uuid)>,

    bootstrapped: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new application state, not yet connected to a backend.
    pub fn new() -> Self {
        Self {
            messages: MessageStore::new(),
            input_text: String::new(),
            show_thoughts: false,
            last_error: None,
            animator: None,
            chat: None,
            pending_request: None,
            bootstrapped: false,
        }
    }

    /// Wire up the transport worker; the animator shares its runtime.
    pub fn connect(&mut self, chat: ChatHandle) {
        self.animator = Some(TurnAnimator::new(self.messages.clone(), chat.runtime()));
        self.chat = Some(chat);
    }

    /// One-shot bootstrap: reset the backend session and play the welcome
    /// script through the plain reveal path.
    pub fn bootstrap(&mut self) {
        if self.bootstrapped {
            return;
        }
        self.bootstrapped = true;

        if let Some(chat) = &self.chat {
            if let Err(e) = chat.send(ChatCommand::Reset) {
                warn!(error = %e, "failed to request session reset");
            }
        }
        if let Some(animator) = &self.animator {
            animator.play_script(WELCOME_SCRIPT.iter().map(|s| s.to_string()).collect());
        }
    }

    /// Observable animation state for this frame.
    pub fn visuals(&self) -> VisualState {
        self.animator
            .as_ref()
            .map(TurnAnimator::snapshot)
            .unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.as_ref().is_some_and(|a| !a.is_idle())
    }

    /// Submit the current input as a user word.
    pub fn send_message(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }

        let user_id = self.messages.add_user(&text);
        self.input_text.clear();

        let Some(chat) = &self.chat else {
            return;
        };

        let request_id = Uuid::new_v4();
        match chat.send(ChatCommand::Send {
            text,
            request_id,
        }) {
            Ok(()) => self.pending_request = Some((request_id, user_id)),
            Err(e) => {
                warn!(error = %e, "failed to submit word");
                self.messages.add_assistant(FALLBACK_REPLY);
            }
        }
    }

    /// Drain transport events.
    pub fn poll_events(&mut self) {
        let Some(chat) = self.chat.clone() else {
            return;
        };
        while let Some(event) = chat.try_recv_event() {
            match event {
                ChatEvent::Turn {
                    request_id,
                    response,
                } => self.handle_turn(request_id, response),
                ChatEvent::Error { request_id, error } => self.handle_error(request_id, error),
                ChatEvent::Shutdown => debug!("transport worker shut down"),
            }
        }
    }

    fn handle_turn(&mut self, request_id: Uuid, response: TurnResponse) {
        let pending_user = match self.pending_request {
            Some((id, user_id)) if id == request_id => {
                self.pending_request = None;
                Some(user_id)
            }
            _ => None,
        };

        if response.is_unrelated() {
            // fall back to the latest user message if the request mapping
            // was lost
            let marked = pending_user.or_else(|| self.messages.last_user_id());
            if let Some(user_id) = marked {
                self.messages.set_question_mark(user_id, true);
            }
        }

        let bot_id = self.messages.add_assistant("");
        match &self.animator {
            Some(animator) => {
                animator.run(bot_id, response.to_turn(), self.show_thoughts);
            }
            None => self.messages.set_text(bot_id, &response.response),
        }
    }

    fn handle_error(&mut self, request_id: Option<Uuid>, error: String) {
        warn!(?request_id, error = %error, "turn failed");
        self.last_error = Some(error);
        self.pending_request = None;

        // settle whatever was animating, then show the fallback reply
        if let Some(animator) = &self.animator {
            animator.cancel();
        }
        self.messages.add_assistant(FALLBACK_REPLY);
    }

    /// Tapping an assistant bubble reveals its rating controls (and hides
    /// everyone else's).
    pub fn show_rating_controls(&mut self, message_id: Uuid) {
        self.messages.set_rating_controls_visible(message_id, true);
    }

    pub fn rate_message(&mut self, message_id: Uuid, liked: bool) {
        let rating = if liked { Rating::Liked } else { Rating::Disliked };
        self.messages.set_rating(message_id, rating);
        self.messages.set_rating_controls_visible(message_id, false);

        let Some(message) = self.messages.get(message_id) else {
            return;
        };
        if let Some(chat) = &self.chat {
            if let Err(e) = chat.send(ChatCommand::Rate {
                message_id,
                text: message.text,
                liked,
            }) {
                warn!(error = %e, "failed to send rating");
            }
        }
    }

    pub fn dismiss_question(&mut self, message_id: Uuid) {
        self.messages.set_question_mark(message_id, false);

        let Some(message) = self.messages.get(message_id) else {
            return;
        };
        if let Some(chat) = &self.chat {
            if let Err(e) = chat.send(ChatCommand::DismissQuestion {
                message_id,
                text: message.text,
            }) {
                warn!(error = %e, "failed to send question dismissal");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_ignores_blank_input() {
        let mut state = AppState::new();
        state.input_text = "   ".to_string();
        state.send_message();
        assert!(state.messages.is_empty());
    }

    #[test]
    fn send_message_appends_and_clears_input() {
        let mut state = AppState::new();
        state.input_text = "olive".to_string();
        state.send_message();

        assert!(state.input_text.is_empty());
        let all = state.messages.get_all();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_user());
        assert_eq!(all[0].text, "olive");
    }

    #[test]
    fn rating_applies_optimistically_without_a_backend() {
        let mut state = AppState::new();
        let id = state.messages.add_assistant("leaf");

        state.show_rating_controls(id);
        assert!(state.messages.get(id).unwrap().show_rating_controls);

        state.rate_message(id, true);
        let message = state.messages.get(id).unwrap();
        assert_eq!(message.rating, Rating::Liked);
        assert!(!message.show_rating_controls);
    }

    #[test]
    fn dismissing_clears_the_question_mark() {
        let mut state = AppState::new();
        let id = state.messages.add_user("word");
        state.messages.set_question_mark(id, true);

        state.dismiss_question(id);
        assert!(!state.messages.get(id).unwrap().show_question_mark);
    }
}
