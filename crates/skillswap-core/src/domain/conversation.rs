//! Conversation aggregation.
//!
//! A conversation is derived state, never persisted: for a requesting user,
//! one entry per distinct counterparty, carrying the most recent message
//! between the pair. Recomputed on every request.

use std::collections::HashMap;

use uuid::Uuid;

use super::Message;

/// One aggregated conversation, before profile lookup.
#[derive(Debug, Clone)]
pub struct ConversationHead {
    pub counterparty_id: Uuid,
    pub last_message: Message,
}

/// Group a user's messages by counterparty, keeping the newest message per
/// group, ordered newest-first.
///
/// Messages not involving `user_id` are ignored. An empty input yields an
/// empty output.
pub fn aggregate_conversations(user_id: Uuid, messages: &[Message]) -> Vec<ConversationHead> {
    let mut latest: HashMap<Uuid, &Message> = HashMap::new();

    for msg in messages {
        if msg.sender_id != user_id && msg.receiver_id != user_id {
            continue;
        }
        let counterparty = msg.counterparty_of(user_id);
        match latest.get(&counterparty) {
            Some(current) if current.created_at >= msg.created_at => {}
            _ => {
                latest.insert(counterparty, msg);
            }
        }
    }

    let mut heads: Vec<ConversationHead> = latest
        .into_iter()
        .map(|(counterparty_id, msg)| ConversationHead {
            counterparty_id,
            last_message: msg.clone(),
        })
        .collect();

    heads.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
    heads
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn message_at(sender: Uuid, receiver: Uuid, content: &str, minutes_ago: i64) -> Message {
        let mut msg = Message::new(sender, receiver, content.to_string());
        msg.created_at = Utc::now() - Duration::minutes(minutes_ago);
        msg
    }

    #[test]
    fn zero_messages_yields_empty_list() {
        let heads = aggregate_conversations(Uuid::new_v4(), &[]);
        assert!(heads.is_empty());
    }

    #[test]
    fn one_entry_per_counterparty_with_newest_message() {
        let me = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let messages = vec![
            message_at(me, alice, "old to alice", 30),
            message_at(alice, me, "newest from alice", 5),
            message_at(me, alice, "middle to alice", 10),
            message_at(bob, me, "from bob", 20),
        ];

        let heads = aggregate_conversations(me, &messages);

        assert_eq!(heads.len(), 2);
        let alice_head = heads
            .iter()
            .find(|h| h.counterparty_id == alice)
            .expect("alice conversation");
        assert_eq!(alice_head.last_message.content, "newest from alice");
    }

    #[test]
    fn ordered_by_last_message_newest_first() {
        let me = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let carol = Uuid::new_v4();

        let messages = vec![
            message_at(me, bob, "bob", 20),
            message_at(carol, me, "carol", 1),
            message_at(alice, me, "alice", 10),
        ];

        let heads = aggregate_conversations(me, &messages);
        let order: Vec<Uuid> = heads.iter().map(|h| h.counterparty_id).collect();
        assert_eq!(order, vec![carol, alice, bob]);
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        let me = Uuid::new_v4();
        let others = [Uuid::new_v4(), Uuid::new_v4()];

        let messages = vec![message_at(others[0], others[1], "not mine", 5)];
        assert!(aggregate_conversations(me, &messages).is_empty());
    }
}
