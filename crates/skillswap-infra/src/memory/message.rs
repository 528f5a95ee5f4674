use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use skillswap_core::domain::Message;
use skillswap_core::error::RepoError;
use skillswap_core::ports::MessageRepository;

/// In-memory message store: a plain append-only log.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    log: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: Message) -> Result<Message, RepoError> {
        self.log.write().await.push(message.clone());
        Ok(message)
    }

    async fn list_between(&self, user_a: Uuid, user_b: Uuid) -> Result<Vec<Message>, RepoError> {
        let log = self.log.read().await;
        let mut messages: Vec<Message> = log
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError> {
        let log = self.log.read().await;
        let mut messages: Vec<Message> = log
            .iter()
            .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn mark_read(&self, receiver_id: Uuid, sender_id: Uuid) -> Result<u64, RepoError> {
        let mut log = self.log.write().await;
        let mut updated = 0;
        for msg in log.iter_mut() {
            if msg.sender_id == sender_id && msg.receiver_id == receiver_id && !msg.read {
                msg.read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
