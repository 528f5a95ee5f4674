//! Realtime fanout over Socket.IO.
//!
//! One gateway per process, constructed at startup and handed to handlers
//! through app data. The server is the sole emitter of domain events: after
//! a successful store mutation the handler calls the gateway, which emits
//! `message-created` to the two participants' rooms and broadcasts post
//! events to every connected client. Client-emitted domain events are not
//! rebroadcast.
//!
//! There is no queueing or replay: a client that reconnects re-fetches state
//! over REST.

mod registry;

pub use registry::ConnectionRegistry;

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use serde::Serialize;
use socketioxide::{
    SocketIo,
    extract::{Data, SocketRef},
};
use tokio::net::TcpListener;
use uuid::Uuid;

use skillswap_core::ports::TokenService;
use skillswap_shared::dto::{LikeResponse, MessageResponse, PostResponse};

/// Event vocabulary of the realtime channel.
pub mod event {
    pub const MESSAGE_CREATED: &str = "message-created";
    pub const POST_CREATED: &str = "post-created";
    pub const POST_UPDATED: &str = "post-updated";
    pub const POST_DELETED: &str = "post-deleted";
    pub const POST_LIKED: &str = "post-liked";
}

fn user_room(user_id: Uuid) -> String {
    format!("user:{user_id}")
}

/// Handle for emitting realtime events, shared with request handlers.
#[derive(Clone)]
pub struct RealtimeGateway {
    io: SocketIo,
    registry: Arc<ConnectionRegistry>,
}

impl RealtimeGateway {
    /// Deliver a new message to its two participants only.
    pub fn message_created(&self, message: &MessageResponse) {
        self.emit_to_user(message.sender.id, event::MESSAGE_CREATED, message);
        if message.receiver.id != message.sender.id {
            self.emit_to_user(message.receiver.id, event::MESSAGE_CREATED, message);
        }
    }

    pub fn post_created(&self, post: &PostResponse) {
        self.broadcast(event::POST_CREATED, post);
    }

    pub fn post_updated(&self, post: &PostResponse) {
        self.broadcast(event::POST_UPDATED, post);
    }

    pub fn post_deleted(&self, post_id: Uuid) {
        self.broadcast(event::POST_DELETED, &serde_json::json!({ "postId": post_id }));
    }

    pub fn post_liked(&self, like: &LikeResponse) {
        self.broadcast(event::POST_LIKED, like);
    }

    /// Number of sockets that have identified.
    pub async fn identified_count(&self) -> usize {
        self.registry.len().await
    }

    fn emit_to_user<T: Serialize>(&self, user_id: Uuid, event: &'static str, data: &T) {
        if let Err(e) = self.io.to(user_room(user_id)).emit(event, data) {
            tracing::debug!(event = %event, user_id = %user_id, error = %e, "Emit failed");
        }
    }

    fn broadcast<T: Serialize>(&self, event: &'static str, data: &T) {
        if let Err(e) = self.io.emit(event, data) {
            tracing::debug!(event = %event, error = %e, "Broadcast failed");
        }
    }
}

/// Build a gateway and serve its Socket.IO endpoint on `addr`.
pub fn launch(addr: String, tokens: Arc<dyn TokenService>) -> RealtimeGateway {
    let (svc, io) = SocketIo::new_svc();
    let registry = Arc::new(ConnectionRegistry::new());
    attach_handlers(&io, tokens, registry.clone());

    tokio::spawn(async move {
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => {
                tracing::info!(addr = %addr, "Realtime listener started");
                listener
            }
            Err(e) => {
                tracing::error!(addr = %addr, error = %e, "Failed to bind realtime listener");
                return;
            }
        };

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "Realtime accept failed");
                    continue;
                }
            };

            let svc = TowerToHyperService::new(svc.clone());
            tokio::spawn(async move {
                let conn = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), svc)
                    .with_upgrades();
                if let Err(e) = conn.await {
                    tracing::debug!(peer = %peer, error = %e, "Realtime connection closed");
                }
            });
        }
    });

    RealtimeGateway { io, registry }
}

/// Gateway without a listener. Used by tests; emits go nowhere.
#[cfg(test)]
pub fn detached(tokens: Arc<dyn TokenService>) -> RealtimeGateway {
    let (_svc, io) = SocketIo::new_svc();
    let registry = Arc::new(ConnectionRegistry::new());
    attach_handlers(&io, tokens, registry.clone());
    RealtimeGateway { io, registry }
}

fn attach_handlers(io: &SocketIo, tokens: Arc<dyn TokenService>, registry: Arc<ConnectionRegistry>) {
    io.ns("/", move |socket: SocketRef| {
        let tokens = tokens.clone();
        let registry = registry.clone();
        async move {
            tracing::info!(socket_id = %socket.id, "Client connected");

            // A connection is anonymous until it proves who it is; only then
            // does it receive private message events.
            let reg = registry.clone();
            socket.on(
                "identify",
                move |socket: SocketRef, Data::<String>(token)| {
                    let tokens = tokens.clone();
                    let reg = reg.clone();
                    async move {
                        match tokens.validate_token(&token) {
                            Ok(claims) => {
                                socket.join(user_room(claims.user_id)).ok();
                                reg.bind(socket.id.to_string(), claims.user_id).await;
                                tracing::info!(
                                    socket_id = %socket.id,
                                    user_id = %claims.user_id,
                                    "Socket identified"
                                );
                                socket.emit("identified", &claims.user_id.to_string()).ok();
                            }
                            Err(e) => {
                                tracing::warn!(
                                    socket_id = %socket.id,
                                    error = %e,
                                    "Socket identification rejected"
                                );
                                socket.emit("unauthorized", &e.to_string()).ok();
                            }
                        }
                    }
                },
            );

            let reg = registry.clone();
            socket.on_disconnect(move |socket: SocketRef| {
                let reg = reg.clone();
                async move {
                    reg.unbind(&socket.id.to_string()).await;
                    tracing::info!(socket_id = %socket.id, "Client disconnected");
                }
            });
        }
    });
}
