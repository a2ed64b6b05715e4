use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode};
use libsql::Value;
use tower_sessions::Session;
use uuid::Uuid;

use crate::constants::*;
use crate::database::Db;
use crate::error::AppError;
use crate::models::{LoginPayload, PublicUser, RegisterPayload, User};
use crate::state::AppState;
use crate::validation::{ValidationError, validate_registration};

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

pub async fn create_user(
    db: &Db,
    username: &str,
    password: &str,
    display_name: Option<&str>,
) -> anyhow::Result<PublicUser> {
    let hash = hash_password(password)?;
    let id = Uuid::new_v4().to_string();
    let conn = db.write().await;

    conn.execute(
        "INSERT INTO users (id, name, password_hash, display_name) VALUES (?, ?, ?, ?)",
        vec![
            Value::Text(id.clone()),
            Value::Text(username.to_string()),
            Value::Text(hash),
            display_name.map_or(Value::Null, |name| Value::Text(name.to_string())),
        ],
    )
    .await?;

    Ok(PublicUser {
        id,
        username: username.to_string(),
        display_name: display_name.map(str::to_string),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let display_name = validate_registration(&payload).inspect_err(|e| {
        tracing::debug!("rejected registration for {:?}: {e}", payload.username);
    })?;

    let user = create_user(
        &state.main_db,
        &payload.username,
        &payload.password,
        display_name.as_deref(),
    )
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            AppError::Conflict
        } else {
            AppError::backend(format!("failed to create user: {e}"))
        }
    })?;

    tracing::info!("registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user_by_username(db: &Db, username: &str) -> anyhow::Result<Option<User>> {
    let conn = db.read().await;
    let mut rows = conn
        .query(
            "SELECT id, name, password_hash, display_name FROM users WHERE name = ?",
            [username],
        )
        .await?;

    if let Some(row) = rows.next().await? {
        let id: String = row.get(0)?;
        let username: String = row.get(1)?;
        let password_hash: String = row.get(2)?;
        let display_name = match row.get_value(3)? {
            Value::Text(name) => Some(name),
            _ => None,
        };
        Ok(Some(User {
            id,
            username,
            display_name,
            password_hash,
        }))
    } else {
        Ok(None)
    }
}

pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    if payload.username.trim().is_empty() {
        return Err(ValidationError::Empty("Username").into());
    }
    if payload.password.is_empty() {
        return Err(ValidationError::Empty("Password").into());
    }

    let user = get_user_by_username(&state.main_db, &payload.username)
        .await
        .map_err(|e| AppError::backend(format!("failed to look up user: {e}")))?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::backend(e.to_string()))?;

    if !is_valid {
        tracing::debug!("failed log in attempt for {:?}", payload.username);
        return Err(AppError::InvalidCredentials);
    }

    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, &user.id).await?;
    session.insert(SESSION_USERNAME_KEY, &user.username).await?;
    session
        .insert(SESSION_DISPLAY_NAME_KEY, &user.display_name)
        .await?;

    tracing::info!("user {} logged in", user.id);
    Ok((
        StatusCode::OK,
        Json(PublicUser {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
        }),
    ))
}

/// The user carried by the session, or [AppError::NotAuthenticated].
///
/// Handlers call this before touching any store so an anonymous request
/// never reaches the database.
pub async fn get_current_user(session: &Session) -> Result<PublicUser, AppError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    let username: Option<String> = session.get(SESSION_USERNAME_KEY).await?;
    let display_name: Option<String> = session
        .get::<Option<String>>(SESSION_DISPLAY_NAME_KEY)
        .await?
        .flatten();

    match (user_id, username) {
        (Some(id), Some(username)) => Ok(PublicUser {
            id,
            username,
            display_name,
        }),
        _ => Err(AppError::NotAuthenticated),
    }
}

pub async fn me(session: Session) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let user = get_current_user(&session).await?;
    Ok((StatusCode::OK, Json(user)))
}

pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    session.flush().await?;

    Ok(StatusCode::NO_CONTENT)
}
