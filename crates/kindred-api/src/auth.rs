use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use kindred_store::Store;
use kindred_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use kindred_types::models::Account;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub jwt_secret: String,
}

/// Same message for unknown email and wrong password, so login failures do
/// not reveal whether an account exists.
const INVALID_CREDENTIALS: &str = "invalid email or password";

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username, email and password are required".into(),
        ));
    }

    // Hash with Argon2id before touching the store.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();

    let account = Account {
        id: Uuid::new_v4(),
        username: req.username,
        email: req.email,
        password_hash,
        bio: String::new(),
        avatar: String::new(),
        age: None,
        gender: None,
        interest: None,
        created_at: Utc::now(),
    };
    let user_id = account.id;

    // Uniqueness is checked inside the same locked update that inserts, so
    // two racing registrations cannot both pass the scan.
    state
        .store
        .accounts
        .update(move |accounts| {
            if accounts.iter().any(|a| a.username == account.username) {
                return Err(ApiError::Conflict("username is already taken".into()));
            }
            if accounts.iter().any(|a| a.email == account.email) {
                return Err(ApiError::Conflict("email address is already in use".into()));
            }
            accounts.push(account);
            Ok(())
        })
        .await??;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.store.accounts.load().await;
    let account = accounts
        .iter()
        .find(|a| a.email == req.email)
        .ok_or_else(|| ApiError::BadRequest(INVALID_CREDENTIALS.into()))?;

    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|e| anyhow::anyhow!("stored hash is unparseable: {e}"))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::BadRequest(INVALID_CREDENTIALS.into()))?;

    let token = create_token(&state.jwt_secret, account.id, &account.username)?;

    Ok(Json(LoginResponse {
        token,
        user_id: account.id,
        username: account.username.clone(),
    }))
}

fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
