use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message entity - one direct message between two users.
///
/// Messages are append-only: after creation the only permitted mutation is
/// flipping the `read` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread message.
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// The other participant of this message, relative to `user_id`.
    pub fn counterparty_of(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_is_unread() {
        let msg = Message::new(Uuid::new_v4(), Uuid::new_v4(), "hi".to_string());
        assert!(!msg.read);
    }

    #[test]
    fn counterparty_is_the_other_side() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let msg = Message::new(a, b, "hi".to_string());
        assert_eq!(msg.counterparty_of(a), b);
        assert_eq!(msg.counterparty_of(b), a);
    }
}
