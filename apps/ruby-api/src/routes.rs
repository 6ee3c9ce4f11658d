use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

use ruby_domain::time_expr;
use ruby_service::{
	Error, HistoryRequest, HistoryResponse, Message, NoteItem, NotesRequest, NotesResponse,
	TurnState,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/chat/send", post(send_message))
		.route("/v1/chat/messages", get(list_messages))
		.route("/v1/history", get(list_history).delete(delete_history))
		.route("/v1/notes", get(list_notes).delete(delete_notes))
		.route("/v1/notes/reminders", get(upcoming_reminders))
		.route("/v1/notes/{id}", delete(delete_note))
		.route("/v1/notes/{id}/complete", post(complete_note))
		.route("/v1/settings/api-url", get(get_api_url).put(put_api_url))
		.with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
	pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
	pub reply: String,
	pub state: TurnState,
	pub handled_by: Option<&'static str>,
	pub note_id: Option<i64>,
	pub notification_id: Option<String>,
	pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
	pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
	pub deleted: u64,
}

#[derive(Debug, Deserialize)]
pub struct RemindersQuery {
	pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiUrlBody {
	pub api_url: String,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn send_message(
	State(state): State<AppState>,
	Json(payload): Json<SendRequest>,
) -> Result<Json<SendResponse>, ApiError> {
	let mut conversation = state.conversation.lock().await;
	let Some(outcome) = conversation.handle_send(&state.service, &payload.text).await else {
		return Err(json_error(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			"text must not be empty.",
			Some(vec!["$.text".to_string()]),
		));
	};

	Ok(Json(SendResponse {
		reply: outcome.reply,
		state: outcome.state,
		handled_by: outcome.handled_by,
		note_id: outcome.note_id,
		notification_id: outcome.notification_id,
		messages: conversation.messages().to_vec(),
	}))
}

async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
	let conversation = state.conversation.lock().await;

	Json(MessagesResponse { messages: conversation.messages().to_vec() })
}

async fn list_history(
	State(state): State<AppState>,
	Query(query): Query<HistoryRequest>,
) -> Result<Json<HistoryResponse>, ApiError> {
	Ok(Json(state.service.list_history(query).await?))
}

async fn delete_history(State(state): State<AppState>) -> Result<Json<DeletedResponse>, ApiError> {
	let deleted = state.service.delete_history().await?;

	Ok(Json(DeletedResponse { deleted }))
}

async fn list_notes(
	State(state): State<AppState>,
	Query(query): Query<NotesRequest>,
) -> Result<Json<NotesResponse>, ApiError> {
	Ok(Json(state.service.list_notes(query).await?))
}

async fn delete_notes(State(state): State<AppState>) -> Result<Json<DeletedResponse>, ApiError> {
	let deleted = state.service.delete_all_notes().await?;

	Ok(Json(DeletedResponse { deleted }))
}

async fn delete_note(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
	state.service.delete_note(id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn complete_note(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<Json<NoteItem>, ApiError> {
	Ok(Json(state.service.complete_note(id).await?))
}

async fn upcoming_reminders(
	State(state): State<AppState>,
	Query(query): Query<RemindersQuery>,
) -> Result<Json<NotesResponse>, ApiError> {
	let date = match query.date.as_deref() {
		Some(raw) => Some(time_expr::parse_date_label(raw).ok_or_else(|| {
			json_error(
				StatusCode::BAD_REQUEST,
				"INVALID_REQUEST",
				"date must be formatted as YYYY-MM-DD.",
				Some(vec!["date".to_string()]),
			)
		})?),
		None => None,
	};

	Ok(Json(state.service.upcoming_reminders(date).await?))
}

async fn get_api_url(State(state): State<AppState>) -> Result<Json<ApiUrlBody>, ApiError> {
	let api_url = state.service.api_url().await?;

	Ok(Json(ApiUrlBody { api_url }))
}

async fn put_api_url(
	State(state): State<AppState>,
	Json(payload): Json<ApiUrlBody>,
) -> Result<Json<ApiUrlBody>, ApiError> {
	let api_url = state.service.set_api_url(&payload.api_url).await?;

	Ok(Json(ApiUrlBody { api_url }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Provider { message } =>
				json_error(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message, None),
			Error::Unavailable { message } =>
				json_error(StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Storage request failed.",
					None,
				)
			},
			Error::Device { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "DEVICE_ERROR", message, None),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
