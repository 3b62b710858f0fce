//! Axum route handlers for user-to-user chat.
//!
//! Listing a conversation's messages marks the reader's unread messages as
//! read, mirroring the original client's subscription side effect. Message
//! inserts are idempotent on a client-supplied id, and listings de-duplicate
//! by id, so a message delivered twice renders once.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::settings::load_ai_settings;
use crate::chat::prompts::{AUTO_REPLY_PROMPT_TEMPLATE, AUTO_REPLY_SYSTEM_TEMPLATE};
use crate::errors::AppError;
use crate::models::message::{ConversationRow, MessageRow};
use crate::models::persona::PersonaRow;
use crate::state::AppState;

/// How much transcript the auto-reply prompt sees.
const AUTO_REPLY_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct OpenConversationRequest {
    pub user_id: Uuid,
    pub peer_id: Uuid,
}

/// POST /api/v1/chat/conversations
///
/// Gets or creates the conversation between two users. Participants are
/// stored in normalized order so the pair is unique.
pub async fn handle_open_conversation(
    State(state): State<AppState>,
    Json(request): Json<OpenConversationRequest>,
) -> Result<Json<ConversationRow>, AppError> {
    if request.user_id == request.peer_id {
        return Err(AppError::Validation(
            "cannot open a conversation with yourself".to_string(),
        ));
    }

    let (a, b) = normalize_pair(request.user_id, request.peer_id);

    let conversation = sqlx::query_as::<_, ConversationRow>(
        r#"
        INSERT INTO conversations (id, user_a, user_b)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_a, user_b) DO UPDATE SET user_a = EXCLUDED.user_a
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(a)
    .bind(b)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(conversation))
}

/// GET /api/v1/chat/conversations
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ConversationRow>>, AppError> {
    let conversations = sqlx::query_as::<_, ConversationRow>(
        "SELECT * FROM conversations WHERE user_a = $1 OR user_b = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(conversations))
}

/// GET /api/v1/chat/conversations/:id/messages
///
/// Returns the transcript oldest-first and marks messages addressed to the
/// reader as read.
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let _ = fetch_participant_conversation(&state, conversation_id, params.user_id).await?;

    // Mark-as-read side effect before the select, so the returned rows
    // reflect the state the reader now sees.
    sqlx::query(
        "UPDATE messages SET read = TRUE
         WHERE conversation_id = $1 AND sender_id <> $2 AND NOT read",
    )
    .bind(conversation_id)
    .bind(params.user_id)
    .execute(&state.db)
    .await?;

    let messages = sqlx::query_as::<_, MessageRow>(
        "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(conversation_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(dedup_by_id(messages)))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub user_id: Uuid,
    pub content: String,
    /// Client-generated id makes retried sends idempotent.
    pub id: Option<Uuid>,
}

/// POST /api/v1/chat/conversations/:id/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<MessageRow>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    let _ = fetch_participant_conversation(&state, conversation_id, request.user_id).await?;

    let message_id = request.id.unwrap_or_else(Uuid::new_v4);

    // Idempotent insert: a duplicate delivery of the same client id is a
    // no-op and the stored row is returned unchanged.
    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, ai_generated)
        VALUES ($1, $2, $3, $4, FALSE)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(message_id)
    .bind(conversation_id)
    .bind(request.user_id)
    .bind(&request.content)
    .execute(&state.db)
    .await?;

    let message = sqlx::query_as::<_, MessageRow>("SELECT * FROM messages WHERE id = $1")
        .bind(message_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(message))
}

#[derive(Debug, Deserialize)]
pub struct AiReplyRequest {
    pub user_id: Uuid,
    /// Persona whose tone and style drive the reply. Must be owned by the
    /// replying user.
    pub persona_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AiReplyResponse {
    pub message: MessageRow,
}

/// POST /api/v1/chat/conversations/:id/ai-reply
///
/// Generates the replying user's next message in their persona's voice and
/// inserts it into the conversation.
pub async fn handle_ai_reply(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Json(request): Json<AiReplyRequest>,
) -> Result<Json<AiReplyResponse>, AppError> {
    let _ = fetch_participant_conversation(&state, conversation_id, request.user_id).await?;

    let persona =
        sqlx::query_as::<_, PersonaRow>("SELECT * FROM personas WHERE id = $1 AND user_id = $2")
            .bind(request.persona_id)
            .bind(request.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Persona {} not found", request.persona_id))
            })?;

    let history = sqlx::query_as::<_, MessageRow>(
        "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(conversation_id)
    .bind(AUTO_REPLY_HISTORY_LIMIT as i64)
    .fetch_all(&state.db)
    .await?;

    if history.is_empty() {
        return Err(AppError::Validation(
            "cannot auto-reply to an empty conversation".to_string(),
        ));
    }

    let system = AUTO_REPLY_SYSTEM_TEMPLATE
        .replace("{persona_name}", &persona.name)
        .replace("{description}", &persona.description)
        .replace("{tone}", &persona.tone)
        .replace("{response_style}", &persona.response_style);
    let transcript = render_history(&history, request.user_id);
    let prompt = AUTO_REPLY_PROMPT_TEMPLATE.replace("{history}", &transcript);

    let settings = load_ai_settings(&state.db).await?;
    let reply_text = state
        .llm
        .call_text(&prompt, &system, &settings.generation_params())
        .await
        .map_err(|e| AppError::Llm(format!("Auto-reply generation failed: {e}")))?;

    let message = sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, ai_generated)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(conversation_id)
    .bind(request.user_id)
    .bind(reply_text.trim())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(AiReplyResponse { message }))
}

async fn fetch_participant_conversation(
    state: &AppState,
    conversation_id: Uuid,
    user_id: Uuid,
) -> Result<ConversationRow, AppError> {
    let conversation = sqlx::query_as::<_, ConversationRow>(
        "SELECT * FROM conversations WHERE id = $1",
    )
    .bind(conversation_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Conversation {conversation_id} not found")))?;

    if !conversation.involves(user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(conversation)
}

/// Stable participant ordering so each user pair maps to one conversation row.
fn normalize_pair(x: Uuid, y: Uuid) -> (Uuid, Uuid) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// Drops later duplicates of the same message id, preserving order.
fn dedup_by_id(messages: Vec<MessageRow>) -> Vec<MessageRow> {
    let mut seen = std::collections::HashSet::new();
    messages
        .into_iter()
        .filter(|m| seen.insert(m.id))
        .collect()
}

/// Renders a transcript for the auto-reply prompt, oldest first, labeling the
/// replying user's messages "me" and the peer's "them".
fn render_history(newest_first: &[MessageRow], replying_user: Uuid) -> String {
    newest_first
        .iter()
        .rev()
        .map(|m| {
            let who = if m.sender_id == replying_user {
                "me"
            } else {
                "them"
            };
            format!("{who}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
