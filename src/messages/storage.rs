use super::types::{Message, Rating, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Append-only conversation log with point mutations.
///
/// Cheap to clone; clones share the same underlying log. All mutations are
/// synchronous and total: an unknown id is a no-op.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn add(&self, message: Message) -> Uuid {
        let id = message.id;
        self.messages.write().push(message);
        id
    }

    pub fn add_user(&self, text: impl Into<String>) -> Uuid {
        self.add(Message::new(Sender::User, text))
    }

    pub fn add_assistant(&self, text: impl Into<String>) -> Uuid {
        self.add(Message::new(Sender::Assistant, text))
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Message> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    /// Id of the most recently appended user message.
    pub fn last_user_id(&self) -> Option<Uuid> {
        self.messages
            .read()
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(|m| m.id)
    }

    pub fn set_text(&self, id: Uuid, text: &str) {
        let mut messages = self.messages.write();
        if let Some(message) = messages.iter_mut().find(|m| m.id == id) {
            message.text = text.to_string();
        }
    }

    pub fn set_question_mark(&self, id: Uuid, on: bool) {
        let mut messages = self.messages.write();
        if let Some(message) = messages.iter_mut().find(|m| m.id == id) {
            message.show_question_mark = on;
        }
    }

    pub fn set_rating(&self, id: Uuid, rating: Rating) {
        let mut messages = self.messages.write();
        if let Some(message) = messages.iter_mut().find(|m| m.id == id) {
            message.rating = rating;
        }
    }

    /// Showing the rating controls for one message hides them everywhere
    /// else; at most one message has visible controls at any instant.
    pub fn set_rating_controls_visible(&self, id: Uuid, visible: bool) {
        let mut messages = self.messages.write();
        for message in messages.iter_mut() {
            message.show_rating_controls = visible && message.id == id;
        }
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_insertion_order() {
        let store = MessageStore::new();
        let a = store.add_user("hello");
        let b = store.add_assistant("olive");
        let c = store.add_user("leaf");

        let all = store.get_all();
        assert_eq!(all.len(), 3);
        assert_eq!(vec![a, b, c], all.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn set_text_replaces_message_text() {
        let store = MessageStore::new();
        let id = store.add_assistant("");
        store.set_text(id, "branch");
        assert_eq!(store.get(id).unwrap().text, "branch");
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let store = MessageStore::new();
        let id = store.add_user("hello");
        store.set_text(Uuid::new_v4(), "nope");
        store.set_rating(Uuid::new_v4(), Rating::Liked);
        store.set_question_mark(Uuid::new_v4(), true);

        let message = store.get(id).unwrap();
        assert_eq!(message.text, "hello");
        assert_eq!(message.rating, Rating::None);
        assert!(!message.show_question_mark);
    }

    #[test]
    fn rating_controls_are_exclusive() {
        let store = MessageStore::new();
        let a = store.add_assistant("one");
        let b = store.add_assistant("two");

        store.set_rating_controls_visible(a, true);
        store.set_rating_controls_visible(b, true);

        let visible: Vec<Uuid> = store
            .get_all()
            .iter()
            .filter(|m| m.show_rating_controls)
            .map(|m| m.id)
            .collect();
        assert_eq!(visible, vec![b]);

        store.set_rating_controls_visible(b, false);
        assert!(store.get_all().iter().all(|m| !m.show_rating_controls));
    }

    #[test]
    fn last_user_id_skips_assistant_messages() {
        let store = MessageStore::new();
        assert_eq!(store.last_user_id(), None);

        let user = store.add_user("word");
        store.add_assistant("reply");
        assert_eq!(store.last_user_id(), Some(user));
    }
}
