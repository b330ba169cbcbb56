use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use kindred_types::api::{
    AddCommentRequest, Claims, CreatePostRequest, LikeResponse, PostView, UpdatePostRequest,
};
use kindred_types::models::{Account, Comment, Post};

use crate::UNKNOWN_USER;
use crate::auth::AppState;
use crate::error::ApiError;
use crate::images;

/// Join a post with its author's current username and avatar. The stored
/// `author_name` is left as captured at creation; only the view is fresh.
fn view_for(post: Post, accounts: &[Account]) -> PostView {
    match accounts.iter().find(|a| a.id == post.author_id) {
        Some(author) => PostView {
            post,
            username: author.username.clone(),
            avatar: Some(author.avatar.clone()),
        },
        None => PostView {
            post,
            username: UNKNOWN_USER.to_string(),
            avatar: None,
        },
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    // Two independent loads; there is no transaction spanning collections.
    let posts = state.store.posts.load().await;
    let accounts = state.store.accounts.load().await;

    let mut views: Vec<PostView> = posts
        .into_iter()
        .map(|post| view_for(post, &accounts))
        .collect();
    views.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));

    Ok(Json(views))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<Json<PostView>, ApiError> {
    let posts = state.store.posts.load().await;
    let accounts = state.store.accounts.load().await;

    let post = posts
        .into_iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;

    Ok(Json(view_for(post, &accounts)))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // An image alone does not satisfy the content requirement at create time.
    let content = req
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("post content is required".into()))?
        .to_string();
    images::check_image(req.image.as_deref())?;

    let post = Post {
        id: Uuid::new_v4(),
        author_id: claims.sub,
        author_name: claims.username,
        content,
        image: req.image.filter(|i| !i.is_empty()),
        likes: vec![],
        comments: vec![],
        created_at: Utc::now(),
        updated_at: None,
    };
    let created = post.clone();

    state
        .store
        .posts
        .update(move |posts| posts.push(post))
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    images::check_image(req.image.as_deref())?;

    let caller = claims.sub;
    let updated = state
        .store
        .posts
        .update(move |posts| {
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
            if post.author_id != caller {
                return Err(ApiError::Forbidden(
                    "you are not allowed to edit this post".into(),
                ));
            }

            let new_content = req
                .content
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            let new_image = req.image.filter(|i| !i.is_empty());

            // The edit must leave the post with text or an image.
            if new_content.is_none() && post.image.is_none() && new_image.is_none() {
                return Err(ApiError::BadRequest(
                    "a post needs text or an image".into(),
                ));
            }

            if let Some(content) = new_content {
                post.content = content;
            }
            if req.remove_image {
                post.image = None;
            }
            // Replacement wins over removal when both are indicated.
            if let Some(image) = new_image {
                post.image = Some(image);
            }
            post.updated_at = Some(Utc::now());

            Ok(post.clone())
        })
        .await??;

    Ok(Json(updated))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let caller = claims.sub;
    state
        .store
        .posts
        .update(move |posts| {
            let pos = posts
                .iter()
                .position(|p| p.id == post_id)
                .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
            if posts[pos].author_id != caller {
                return Err(ApiError::Forbidden(
                    "you are not allowed to delete this post".into(),
                ));
            }
            posts.remove(pos);
            Ok(())
        })
        .await??;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LikeResponse>, ApiError> {
    let user = claims.sub;
    let liked = state
        .store
        .posts
        .update(move |posts| {
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
            Ok::<_, ApiError>(post.toggle_like(user))
        })
        .await??;

    Ok(Json(LikeResponse { liked }))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let content = req
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("comment content is required".into()))?
        .to_string();

    let comment = Comment {
        id: Uuid::new_v4(),
        author_id: claims.sub,
        author_name: claims.username,
        content,
        created_at: Utc::now(),
    };
    let created = comment.clone();

    state
        .store
        .posts
        .update(move |posts| {
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
            post.comments.push(comment);
            Ok::<_, ApiError>(())
        })
        .await??;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let posts = state.store.posts.load().await;
    let post = posts
        .into_iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;

    Ok(Json(post.comments))
}
