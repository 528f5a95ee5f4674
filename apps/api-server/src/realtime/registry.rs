//! Connection registry: which socket belongs to which authenticated user.
//!
//! Room membership does the actual event routing; the registry exists so the
//! process has one explicit, inspectable record of live bindings instead of
//! ambient global state.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct ConnectionRegistry {
    bindings: RwLock<HashMap<String, Uuid>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `socket_id` authenticated as `user_id`. A re-identify
    /// overwrites the previous binding.
    pub async fn bind(&self, socket_id: String, user_id: Uuid) {
        self.bindings.write().await.insert(socket_id, user_id);
    }

    /// Drop the binding for a disconnected socket. Unknown (never
    /// identified) sockets are a no-op.
    pub async fn unbind(&self, socket_id: &str) -> Option<Uuid> {
        self.bindings.write().await.remove(socket_id)
    }

    /// Number of identified connections.
    pub async fn len(&self) -> usize {
        self.bindings.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_and_unbind_round_trip() {
        let registry = ConnectionRegistry::new();
        let user = Uuid::new_v4();

        registry.bind("s1".to_string(), user).await;
        assert_eq!(registry.len().await, 1);

        assert_eq!(registry.unbind("s1").await, Some(user));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn reidentify_overwrites_binding() {
        let registry = ConnectionRegistry::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        registry.bind("s1".to_string(), a).await;
        registry.bind("s1".to_string(), b).await;

        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.unbind("s1").await, Some(b));
    }

    #[tokio::test]
    async fn unbind_of_anonymous_socket_is_noop() {
        let registry = ConnectionRegistry::new();
        assert_eq!(registry.unbind("never-seen").await, None);
    }
}
