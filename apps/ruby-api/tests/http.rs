use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use ruby_api::{routes, state::AppState};
use ruby_testkit::{StubBackend, TestDatabase};

async fn test_app(backend: &StubBackend) -> (Router, TestDatabase) {
	let test_db = TestDatabase::new();
	let config = ruby_testkit::test_config(&backend.base_url(), test_db.config());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");

	(routes::router(state), test_db)
}

async fn call(
	app: &Router,
	method: &str,
	uri: &str,
	payload: Option<Value>,
) -> (StatusCode, Value) {
	let builder = Request::builder().method(method).uri(uri);
	let request = match payload {
		Some(payload) => builder
			.header("content-type", "application/json")
			.body(Body::from(payload.to_string())),
		None => builder.body(Body::empty()),
	}
	.expect("Failed to build request.");
	let response = app.clone().oneshot(request).await.expect("Failed to call the router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (status, _) = call(&app, "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn device_command_round_trip() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (status, json) =
		call(&app, "POST", "/v1/chat/send", Some(json!({ "text": "bật đèn flash" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["reply"], "Đã bật đèn flash 🔦");
	assert_eq!(json["state"], "replied_and_spoken");
	assert_eq!(json["messages"].as_array().map(Vec::len), Some(2));
	assert_eq!(json["messages"][0]["sender"], "user");

	let (_, history) = call(&app, "GET", "/v1/history?limit=10", None).await;

	assert_eq!(history["total"], 2);
	assert_eq!(history["items"][0]["sender"], "bot");

	let (_, messages) = call(&app, "GET", "/v1/chat/messages", None).await;

	assert_eq!(messages["messages"][1]["text"], "Đã bật đèn flash 🔦");
}

#[tokio::test]
async fn blank_text_is_rejected() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (status, json) = call(&app, "POST", "/v1/chat/send", Some(json!({ "text": "  " }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
	assert_eq!(json["fields"][0], "$.text");
}

#[tokio::test]
async fn notes_lifecycle() {
	let backend = StubBackend::json(json!({ "content": "mua sữa" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (_, sent) =
		call(&app, "POST", "/v1/chat/send", Some(json!({ "text": "tạo ghi chú mua sữa" }))).await;
	let note_id = sent["note_id"].as_i64().expect("Expected a note id.");
	let (status, notes) = call(&app, "GET", "/v1/notes", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(notes["total"], 1);
	assert_eq!(notes["items"][0]["content"], "mua sữa");

	let (status, completed) =
		call(&app, "POST", &format!("/v1/notes/{note_id}/complete"), None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(completed["is_completed"], true);

	let (status, _) = call(&app, "DELETE", &format!("/v1/notes/{note_id}"), None).await;

	assert_eq!(status, StatusCode::NO_CONTENT);

	let (status, json) = call(&app, "DELETE", &format!("/v1/notes/{note_id}"), None).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_queries_are_rejected() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (status, json) = call(&app, "GET", "/v1/notes/reminders?date=18-10-2026", None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["fields"][0], "date");

	let (status, _) = call(&app, "GET", "/v1/history?limit=0", None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (status, json) = call(&app, "GET", "/v1/notes/reminders?date=2026-10-18", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn api_url_can_be_changed() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (_, current) = call(&app, "GET", "/v1/settings/api-url", None).await;

	assert_eq!(current["api_url"], backend.base_url());

	let (status, _) =
		call(&app, "PUT", "/v1/settings/api-url", Some(json!({ "api_url": "192.168.1.5" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (status, saved) = call(
		&app,
		"PUT",
		"/v1/settings/api-url",
		Some(json!({ "api_url": "http://192.168.1.5:5000/" })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(saved["api_url"], "http://192.168.1.5:5000");
}

#[tokio::test]
async fn calls_cannot_be_confirmed_over_http() {
	let backend = StubBackend::json(json!({ "reply": "unused" }))
		.await
		.expect("Failed to start stub backend.");
	let (app, _db) = test_app(&backend).await;
	let (status, json) =
		call(&app, "POST", "/v1/chat/send", Some(json!({ "text": "gọi cấp cứu" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["reply"], "❌ Đã hủy cuộc gọi khẩn cấp.");
	assert_eq!(json["handled_by"], "app");

	let (_, json) = call(&app, "POST", "/v1/chat/send", Some(json!({ "text": "gọi cho mẹ" }))).await;

	assert_eq!(json["reply"], "❌ Không tìm thấy liên hệ \"mẹ\" trong danh bạ.");
}
