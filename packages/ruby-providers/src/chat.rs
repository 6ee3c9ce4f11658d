use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Decoded chatbot answer. The backend either answers `{reply, type?}` or, for created notes, a
/// free-form object carrying `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotReply {
	pub reply: Option<String>,
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub content: Option<String>,
}

/// Posts `body` to `{api_base}{path}` and decodes the answer. `api_base` is passed separately
/// from `cfg` because the effective base may come from user settings.
pub async fn post_json(
	cfg: &ruby_config::Backend,
	api_base: &str,
	path: &str,
	body: &Value,
) -> Result<BotReply> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", api_base.trim_end_matches('/'), path);

	tracing::debug!(%url, "Posting chat request.");

	let res = client
		.post(url)
		.headers(crate::default_headers(&cfg.default_headers)?)
		.json(body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_bot_reply(json)
}

pub fn parse_bot_reply(json: Value) -> Result<BotReply> {
	let Value::Object(map) = json else {
		return Err(Error::InvalidResponse {
			message: "Chat response must be a JSON object.".to_string(),
		});
	};

	Ok(BotReply {
		reply: map.get("reply").and_then(text_field),
		kind: map.get("type").and_then(text_field),
		content: map.get("content").and_then(text_field),
	})
}

fn text_field(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) if text.is_empty() => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}
