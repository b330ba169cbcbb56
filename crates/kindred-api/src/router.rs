use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::{friends, messages, posts, profile};

/// The full API surface. Registration and login are public; everything else
/// sits behind the bearer-auth middleware.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/profile/{user_id}", get(profile::get_profile))
        .route("/api/update-profile", put(profile::update_profile))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/api/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/api/posts/{post_id}/like", post(posts::toggle_like))
        .route(
            "/api/posts/{post_id}/comments",
            get(posts::list_comments).post(posts::add_comment),
        )
        .route("/api/friend-request", post(friends::send_request))
        .route(
            "/api/friend-request/{request_id}",
            put(friends::respond_request),
        )
        .route("/api/friend-requests/pending", get(friends::list_pending))
        .route("/api/friends", get(friends::list_friends))
        .route("/api/users", get(friends::list_users))
        .route("/api/messages/{friend_id}", get(messages::list_conversation))
        .route("/api/messages", post(messages::send_message))
        .layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
