use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use kindred_types::api::{Claims, PendingRequestView, RespondFriendRequest, SendFriendRequest};
use kindred_types::models::{FriendRequest, Profile, RequestStatus};

use crate::UNKNOWN_USER;
use crate::auth::AppState;
use crate::error::ApiError;

pub async fn send_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendFriendRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = claims.sub;
    let receiver = req.receiver_id;

    if sender == receiver {
        return Err(ApiError::BadRequest(
            "you cannot send a friend request to yourself".into(),
        ));
    }

    let request = FriendRequest {
        id: Uuid::new_v4(),
        sender_id: sender,
        receiver_id: receiver,
        status: RequestStatus::Pending,
        created_at: Utc::now(),
    };
    let created = request.clone();

    state
        .store
        .friendships
        .update(move |friendships| {
            // At most one pending or accepted request per unordered pair,
            // regardless of which side sent it.
            if friendships
                .iter()
                .any(|f| f.is_active() && f.involves(sender, receiver))
            {
                return Err(ApiError::Conflict(
                    "a friend request between you already exists or you are already friends".into(),
                ));
            }
            friendships.push(request);
            Ok(())
        })
        .await??;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn respond_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RespondFriendRequest>,
) -> Result<Json<FriendRequest>, ApiError> {
    let new_status = match req.status.as_str() {
        "accepted" => RequestStatus::Accepted,
        "rejected" => RequestStatus::Rejected,
        _ => {
            return Err(ApiError::BadRequest(
                "status must be \"accepted\" or \"rejected\"".into(),
            ));
        }
    };

    let caller = claims.sub;
    let updated = state
        .store
        .friendships
        .update(move |friendships| {
            let request = friendships
                .iter_mut()
                .find(|f| f.id == request_id)
                .ok_or_else(|| ApiError::NotFound("friend request not found".into()))?;
            if request.receiver_id != caller {
                return Err(ApiError::Forbidden(
                    "only the receiver can respond to this request".into(),
                ));
            }
            // Responded requests are final; they are never re-opened.
            if request.status != RequestStatus::Pending {
                return Err(ApiError::BadRequest(
                    "this request has already been answered".into(),
                ));
            }
            request.status = new_status;
            Ok(request.clone())
        })
        .await??;

    Ok(Json(updated))
}

/// Incoming pending requests, joined with each sender's current username.
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PendingRequestView>>, ApiError> {
    let friendships = state.store.friendships.load().await;
    let accounts = state.store.accounts.load().await;

    let pending = friendships
        .into_iter()
        .filter(|f| f.receiver_id == claims.sub && f.status == RequestStatus::Pending)
        .map(|request| {
            let sender_username = accounts
                .iter()
                .find(|a| a.id == request.sender_id)
                .map(|a| a.username.clone())
                .unwrap_or_else(|| UNKNOWN_USER.to_string());
            PendingRequestView {
                request,
                sender_username,
            }
        })
        .collect();

    Ok(Json(pending))
}

/// Friends are derived, not stored: every accepted request touching the
/// caller, resolved to the other party's profile. Pairs whose account
/// record has gone missing are skipped.
pub async fn list_friends(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let friendships = state.store.friendships.load().await;
    let accounts = state.store.accounts.load().await;
    let caller = claims.sub;

    let friends = friendships
        .iter()
        .filter(|f| {
            f.status == RequestStatus::Accepted
                && (f.sender_id == caller || f.receiver_id == caller)
        })
        .filter_map(|f| {
            let friend_id = f.other_party(caller);
            accounts.iter().find(|a| a.id == friend_id)
        })
        .map(|a| a.profile())
        .collect();

    Ok(Json(friends))
}

/// Everyone the caller could still send a request to: all accounts except
/// the caller and anyone already connected by a pending or accepted request
/// in either direction.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let accounts = state.store.accounts.load().await;
    let friendships = state.store.friendships.load().await;
    let caller = claims.sub;

    let discoverable = accounts
        .iter()
        .filter(|a| a.id != caller)
        .filter(|a| {
            !friendships
                .iter()
                .any(|f| f.is_active() && f.involves(caller, a.id))
        })
        .map(|a| a.profile())
        .collect();

    Ok(Json(discoverable))
}
