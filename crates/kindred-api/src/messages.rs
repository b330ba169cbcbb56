use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use kindred_types::api::{Claims, SendMessageRequest};
use kindred_types::models::Message;

use crate::auth::AppState;
use crate::error::ApiError;

/// The conversation between the caller and `friend_id`, oldest first.
/// Messaging is poll-based; clients re-fetch this endpoint.
pub async fn list_conversation(
    State(state): State<AppState>,
    Path(friend_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.store.messages.load().await;

    let mut conversation: Vec<Message> = messages
        .into_iter()
        .filter(|m| m.between(claims.sub, friend_id))
        .collect();
    conversation.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Ok(Json(conversation))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let receiver_id = req
        .receiver_id
        .ok_or_else(|| ApiError::BadRequest("message receiver is required".into()))?;
    let content = req
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("message content is required".into()))?
        .to_string();

    let message = Message {
        id: Uuid::new_v4(),
        sender_id: claims.sub,
        receiver_id,
        content,
        created_at: Utc::now(),
    };
    let created = message.clone();

    state
        .store
        .messages
        .update(move |messages| messages.push(message))
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}
