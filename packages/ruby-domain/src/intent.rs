use serde::Serialize;

use crate::{
	dispatch::{self, Rule},
	text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteIntent {
	Weather,
	Note,
	Task,
	Appointment,
	Chat,
}
impl RemoteIntent {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Weather => "weather",
			Self::Note => "note",
			Self::Task => "task",
			Self::Appointment => "appointment",
			Self::Chat => "chat",
		}
	}

	/// Backend path for this intent.
	pub fn path(self) -> &'static str {
		match self {
			Self::Weather => "/weather",
			Self::Note => "/note",
			Self::Task => "/task",
			Self::Appointment => "/appointment",
			Self::Chat => "/chat",
		}
	}

	/// JSON body for this intent. `city` is only sent for weather and is `null` when unknown.
	pub fn request_body(self, message: &str, city: Option<&str>) -> serde_json::Value {
		match self {
			Self::Weather => serde_json::json!({ "message": message, "city": city }),
			Self::Note => serde_json::json!({ "content": message }),
			Self::Task => serde_json::json!({ "task": message }),
			Self::Appointment => serde_json::json!({ "text": message }),
			Self::Chat => serde_json::json!({ "message": message }),
		}
	}
}

/// Classifies `message`; the first matching class wins and anything else is generic chat.
/// English keywords such as `weather` are not recognized and fall through to chat.
pub fn classify(message: &str) -> RemoteIntent {
	let normalized = text::normalize(message);

	dispatch::first_match(&intent_rules(), &normalized)
		.map(|(_, intent)| intent)
		.unwrap_or(RemoteIntent::Chat)
}

fn intent_rules() -> Vec<Rule<RemoteIntent>> {
	vec![
		Rule {
			name: "weather",
			matches: |msg| text::is_match("thời tiết|trời", msg),
			build: |_| RemoteIntent::Weather,
		},
		Rule { name: "note", matches: |msg| msg.contains("ghi chú"), build: |_| RemoteIntent::Note },
		Rule {
			name: "task",
			matches: |msg| text::is_match("nhắc việc|nhắc tôi", msg),
			build: |_| RemoteIntent::Task,
		},
		Rule {
			name: "appointment",
			matches: |msg| text::is_match("lịch hẹn|hẹn gặp|đặt lịch", msg),
			build: |_| RemoteIntent::Appointment,
		},
	]
}
