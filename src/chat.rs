use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation. Immutable once created; lives until the
/// session is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Ordered message history for one visitor session. No persistence: a
/// cleared or dropped session is gone.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, content: &str) -> &ChatMessage {
        self.append(Role::User, content)
    }

    pub fn append_assistant(&mut self, content: &str) -> &ChatMessage {
        self.append(Role::Assistant, content)
    }

    fn append(&mut self, role: Role, content: &str) -> &ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            timestamp: Local::now(),
        };
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_keep_order_and_roles() {
        let mut session = ChatSession::new();
        session.append_user("Tell me about the audio tour");
        session.append_assistant("The audio tour covers every wing.");
        session.append_user("And the gardens?");

        let history = session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[2].content, "And the gardens?");
    }

    #[test]
    fn message_ids_are_unique() {
        let mut session = ChatSession::new();
        for _ in 0..20 {
            session.append_user("hi there");
        }
        let mut ids: Vec<Uuid> = session.history().iter().map(|m| m.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn clear_empties_history() {
        let mut session = ChatSession::new();
        session.append_user("hello");
        session.append_assistant("namaste");
        session.clear();
        assert!(session.history().is_empty());
        assert!(session.is_empty());
    }

    #[test]
    fn append_returns_the_stored_message() {
        let mut session = ChatSession::new();
        let id = session.append_user("hello").id;
        assert_eq!(session.history()[0].id, id);
    }
}
