use axum::http::StatusCode;
use serde_json::{Map, Value};

use ruby_providers::{Error, chat};
use ruby_testkit::{StubBackend, StubReply};

fn backend_cfg(headers: Map<String, Value>) -> ruby_config::Backend {
	ruby_config::Backend {
		api_base: "http://unused.invalid".to_string(),
		timeout_ms: 2_000,
		default_headers: headers,
	}
}

#[tokio::test]
async fn posts_body_with_default_headers() {
	let stub = StubBackend::json(serde_json::json!({ "reply": "Xin chào!", "type": "chat" }))
		.await
		.expect("Failed to start stub backend.");
	let mut headers = Map::new();

	headers.insert("x-client".to_string(), Value::String("ruby".to_string()));

	let body = serde_json::json!({ "message": "chào" });
	let reply = chat::post_json(&backend_cfg(headers), &format!("{}/", stub.base_url()), "/chat", &body)
		.await
		.expect("Chat request failed.");

	assert_eq!(reply.reply.as_deref(), Some("Xin chào!"));

	let requests = stub.requests();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].path, "/chat");
	assert_eq!(requests[0].body, body);
	assert!(requests[0].headers.iter().any(|(name, value)| name == "x-client" && value == "ruby"));

	stub.shutdown().await.expect("Failed to stop stub backend.");
}

#[tokio::test]
async fn server_errors_surface_as_errors() {
	let stub = StubBackend::start(StubReply::Status(StatusCode::INTERNAL_SERVER_ERROR))
		.await
		.expect("Failed to start stub backend.");
	let result = chat::post_json(
		&backend_cfg(Map::new()),
		&stub.base_url(),
		"/weather",
		&serde_json::json!({ "message": "trời", "city": null }),
	)
	.await;

	assert!(matches!(result, Err(Error::Reqwest(_))));

	stub.shutdown().await.expect("Failed to stop stub backend.");
}

#[tokio::test]
async fn non_json_bodies_are_errors() {
	let stub = StubBackend::start(StubReply::Text("not json".to_string()))
		.await
		.expect("Failed to start stub backend.");
	let result =
		chat::post_json(&backend_cfg(Map::new()), &stub.base_url(), "/chat", &serde_json::json!({}))
			.await;

	assert!(result.is_err());

	stub.shutdown().await.expect("Failed to stop stub backend.");
}

#[test]
fn non_string_headers_are_rejected() {
	let mut headers = Map::new();

	headers.insert("x-retry".to_string(), Value::from(3));

	assert!(matches!(
		ruby_providers::default_headers(&headers),
		Err(Error::InvalidConfig { .. })
	));
}
