//! Direct message handlers: conversation list, thread fetch, send, mark-read.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use skillswap_core::domain::{Message, aggregate_conversations};
use skillswap_shared::dto::{
    ConversationResponse, MarkReadRequest, MarkReadResponse, MessageResponse, SendMessageRequest,
    UserSummary,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::realtime::RealtimeGateway;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub recipient_id: Option<Uuid>,
}

/// GET /api/messages/conversations - Protected
///
/// One entry per counterparty, carrying the newest message of the pair,
/// newest conversation first.
pub async fn conversations(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let me = identity.user_id;

    let messages = state.messages.find_for_user(me).await?;
    let heads = aggregate_conversations(me, &messages);

    // One bulk profile lookup for every participant, self included.
    let mut ids: Vec<Uuid> = heads.iter().map(|h| h.counterparty_id).collect();
    ids.push(me);
    let profiles: HashMap<Uuid, UserSummary> = state
        .users
        .find_by_ids(&ids)
        .await?
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let mut responses = Vec::with_capacity(heads.len());
    for head in heads {
        // A counterparty may have deleted their account since the exchange;
        // their conversation is omitted rather than half-populated.
        let Some(counterparty) = profiles.get(&head.counterparty_id) else {
            tracing::warn!(
                counterparty_id = %head.counterparty_id,
                "Skipping conversation with missing counterparty"
            );
            continue;
        };
        let Some(last_message) = populated(&head.last_message, &profiles) else {
            continue;
        };
        responses.push(ConversationResponse {
            user: counterparty.clone(),
            last_message,
        });
    }

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/messages?recipientId={id} - Protected
///
/// Full thread between the caller and the recipient, oldest first.
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<MessagesQuery>,
) -> AppResult<HttpResponse> {
    let recipient_id = query
        .recipient_id
        .ok_or_else(|| AppError::BadRequest("recipientId is required".to_string()))?;

    let me = profile_of(&state, identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let other = profile_of(&state, recipient_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let profiles: HashMap<Uuid, UserSummary> =
        [(me.id, me), (other.id, other)].into_iter().collect();

    let messages = state
        .messages
        .list_between(identity.user_id, recipient_id)
        .await?;
    let responses: Vec<MessageResponse> = messages
        .iter()
        .filter_map(|m| populated(m, &profiles))
        .collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/messages - Protected
pub async fn send(
    state: web::Data<AppState>,
    gateway: web::Data<RealtimeGateway>,
    identity: Identity,
    body: web::Json<SendMessageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let content = match req.content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(AppError::BadRequest("content is required".to_string())),
    };
    let receiver_id = req
        .receiver_id
        .ok_or_else(|| AppError::BadRequest("receiverId is required".to_string()))?;

    let sender = profile_of(&state, identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let receiver = profile_of(&state, receiver_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Receiver not found".to_string()))?;

    let message = state
        .messages
        .append(Message::new(identity.user_id, receiver_id, content))
        .await?;
    tracing::info!(
        message_id = %message.id,
        sender_id = %identity.user_id,
        receiver_id = %receiver_id,
        "Message sent"
    );

    let response = MessageResponse::from_parts(message, sender, receiver);
    gateway.message_created(&response);

    Ok(HttpResponse::Created().json(response))
}

/// POST /api/messages/read - Protected
///
/// Marks every message from the given sender to the caller as read.
pub async fn mark_read(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<MarkReadRequest>,
) -> AppResult<HttpResponse> {
    let sender_id = body
        .into_inner()
        .sender_id
        .ok_or_else(|| AppError::BadRequest("senderId is required".to_string()))?;

    let updated = state
        .messages
        .mark_read(identity.user_id, sender_id)
        .await?;

    Ok(HttpResponse::Ok().json(MarkReadResponse { updated }))
}

async fn profile_of(state: &AppState, id: Uuid) -> AppResult<Option<UserSummary>> {
    Ok(state
        .users
        .find_by_id(id)
        .await?
        .map(|u| UserSummary::from(&u)))
}

fn populated(message: &Message, profiles: &HashMap<Uuid, UserSummary>) -> Option<MessageResponse> {
    let sender = profiles.get(&message.sender_id)?.clone();
    let receiver = profiles.get(&message.receiver_id)?.clone();
    Some(MessageResponse::from_parts(message.clone(), sender, receiver))
}
