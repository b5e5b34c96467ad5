//! HTTP request handlers for the question-answering API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::ConversationRepository;
use crate::services::AnswerComposer;

/// Shared state handed to every request.
#[derive(Clone)]
pub struct ApiState {
    pub composer: Arc<AnswerComposer>,
    pub conversations: Arc<dyn ConversationRepository>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub conversation_id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub conversation_id: String,
    pub feedback: i32,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Error response rendered as `{"error": ...}` with an HTTP status.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// `POST /ask` — run the full answer pipeline for one question and persist
/// the conversation under a fresh id.
pub async fn ask(
    State(state): State<ApiState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::bad_request("Missing question"));
    }

    let answer = state.composer.answer(question).await.map_err(|err| {
        error!("Answer pipeline failed: {err}");
        ApiError::internal(err.to_string())
    })?;

    let conversation_id = Uuid::new_v4().to_string();
    state
        .conversations
        .save_conversation(&conversation_id, question, &answer)
        .await
        .map_err(|err| {
            error!("Failed to persist conversation: {err}");
            ApiError::internal(err.to_string())
        })?;

    info!(
        conversation_id = %conversation_id,
        relevance = answer.relevance.as_str(),
        "Answered question"
    );

    Ok(Json(AskResponse {
        conversation_id,
        question: question.to_string(),
        answer: answer.answer,
    }))
}

/// `POST /feedback` — record a +1/-1 rating for a conversation.
pub async fn feedback(
    State(state): State<ApiState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    if request.conversation_id.is_empty() {
        return Err(ApiError::bad_request("Missing conversation_id or feedback"));
    }
    if request.feedback != 1 && request.feedback != -1 {
        return Err(ApiError::bad_request("Feedback must be +1 or -1"));
    }

    state
        .conversations
        .save_feedback(&request.conversation_id, request.feedback)
        .await
        .map_err(|err| {
            error!("Failed to persist feedback: {err}");
            ApiError::internal(err.to_string())
        })?;

    Ok(Json(FeedbackResponse {
        message: format!(
            "Feedback received for conversation {}: {}",
            request.conversation_id, request.feedback
        ),
    }))
}
