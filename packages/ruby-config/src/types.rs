use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub backend: Backend,
	pub device: Device,
	#[serde(default)]
	pub music: Music,
	#[serde(default)]
	pub voice: Voice,
	#[serde(default)]
	pub speech: Speech,
	#[serde(default)]
	pub reminders: Reminders,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub sqlite: Sqlite,
}

#[derive(Debug, Deserialize)]
pub struct Sqlite {
	pub path: String,
	pub pool_max_conns: u32,
}

/// Remote chat backend. `api_base` is only the fallback; the user-edited value lives in the
/// settings table.
#[derive(Debug, Deserialize)]
pub struct Backend {
	pub api_base: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Device {
	pub platform: Platform,
	/// Optional. Used by headless location providers that cannot resolve a real position.
	pub default_city: Option<String>,
	/// Address book served by headless contact providers.
	#[serde(default)]
	pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
	pub name: String,
	pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Android,
	Ios,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Music {
	pub search_url: String,
	pub default_keyword: String,
}
impl Default for Music {
	fn default() -> Self {
		Self {
			search_url: "https://www.youtube.com/results".to_string(),
			default_keyword: "nhạc thư giãn".to_string(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Voice {
	pub locale: String,
	pub listen_timeout_ms: u64,
}
impl Default for Voice {
	fn default() -> Self {
		Self { locale: "vi-VN".to_string(), listen_timeout_ms: 8_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Speech {
	pub language: String,
	pub pitch: f32,
	pub rate: f32,
}
impl Default for Speech {
	fn default() -> Self {
		Self { language: "vi-VN".to_string(), pitch: 1.0, rate: 1.0 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Reminders {
	pub title: String,
}
impl Default for Reminders {
	fn default() -> Self {
		Self { title: "📌 Nhắc nhở".to_string() }
	}
}
