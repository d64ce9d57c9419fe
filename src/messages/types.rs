use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// Feedback recorded on an assistant message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    None,
    Liked,
    Disliked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Marks a user message whose reply was classified as unrelated.
    pub show_question_mark: bool,
    pub rating: Rating,
    /// Rating circles are shown for at most one message at a time.
    pub show_rating_controls: bool,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            show_question_mark: false,
            rating: Rating::None,
            show_rating_controls: false,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.sender, Sender::User)
    }
}
