use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::chat::prompt::{self, Category};
use crate::db;
use crate::error::AppError;
use crate::models::{ChatMessage, ChatSession};
use crate::state::SharedState;

const GREETING: &str = "Hello there! I'm your health and wellness assistant. I can help \
with physical health, stress management, emotional wellbeing and lifestyle guidance. \
How can I help you today?";

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub new_session: bool,
}

fn msg(sender: &str, text: &str) -> ChatMessage {
    ChatMessage {
        sender: sender.to_string(),
        text: text.to_string(),
        time: Utc::now(),
    }
}

pub async fn list_sessions(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sessions = db::chat_sessions::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(json!({ "sessions": sessions })))
}

pub async fn get_session(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>, AppError> {
    let session = db::chat_sessions::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    Ok(Json(session))
}

pub async fn delete_session(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::chat_sessions::delete_owned(&state.pool, id, auth.user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Session not found".to_string()));
    }
    Ok(Json(json!({ "message": "Session deleted successfully" })))
}

/// Proxy a message to the generative backend and record the exchange in
/// the caller's session. Session ownership always comes from the token,
/// never from the request body.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".to_string()));
    }

    let backend = state
        .chat_backend
        .as_ref()
        .ok_or_else(|| AppError::Internal("Chat backend not configured".to_string()))?;

    let category = prompt::categorize(&req.message);
    let full_prompt = prompt::build_prompt(&req.message, category);

    let mut reply = backend
        .generate(&full_prompt)
        .await
        .map_err(AppError::Internal)?;

    if category == Category::Medical {
        reply.push_str(prompt::MEDICAL_DISCLAIMER);
    }

    if req.new_session {
        let title = prompt::session_title(&req.message);
        let messages = vec![
            msg("bot", GREETING),
            msg("user", &req.message),
            msg("bot", &reply),
        ];
        let session =
            db::chat_sessions::create(&state.pool, auth.user_id, &title, messages).await?;
        return Ok(Json(json!({ "reply": reply, "session": session })));
    }

    if let Some(session_id) = req.session_id {
        let session = db::chat_sessions::find_owned(&state.pool, session_id, auth.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

        let mut messages = session.messages.0;
        messages.push(msg("user", &req.message));
        messages.push(msg("bot", &reply));

        let session =
            db::chat_sessions::update_messages(&state.pool, session_id, auth.user_id, messages)
                .await?
                .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

        return Ok(Json(json!({ "reply": reply, "session": session })));
    }

    Ok(Json(json!({ "reply": reply })))
}
