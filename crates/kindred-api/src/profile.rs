use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use kindred_types::api::Claims;
use kindred_types::models::{Profile, ProfileUpdate};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::images;

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<Json<Profile>, ApiError> {
    let accounts = state.store.accounts.load().await;
    let account = accounts
        .iter()
        .find(|a| a.id == user_id)
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    Ok(Json(account.profile()))
}

/// Merge-on-undefined: only fields present in the body overwrite stored
/// values. Re-sending the current avatar data URI keeps it verbatim;
/// omitting it preserves the stored one.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    images::check_image(update.avatar.as_deref())?;

    let user_id = claims.sub;
    let profile = state
        .store
        .accounts
        .update(move |accounts| {
            let account = accounts
                .iter_mut()
                .find(|a| a.id == user_id)
                .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
            update.apply(account);
            Ok::<_, ApiError>(account.profile())
        })
        .await??;

    Ok(Json(profile))
}
