use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use ruby_config::{Config, Error, Platform};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.expect("Sample config must include the requested section.");
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("ruby_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> ruby_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = ruby_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn validation_message(result: ruby_config::Result<Config>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		Err(other) => panic!("Expected validation error, got {other:?}."),
		Ok(_) => panic!("Expected validation error, got a config."),
	}
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.device.platform, Platform::Android);
	assert_eq!(cfg.voice.listen_timeout_ms, 8_000);
	assert_eq!(
		cfg.backend.default_headers.get("x-client").and_then(serde_json::Value::as_str),
		Some("ruby")
	);
}

#[test]
fn api_base_trailing_slash_is_trimmed() {
	let payload =
		sample_with("backend", "api_base", Value::String("http://10.0.0.2:5000/".to_string()));
	let cfg = load_payload(payload).expect("Config must load.");

	assert_eq!(cfg.backend.api_base, "http://10.0.0.2:5000");
}

#[test]
fn api_base_requires_http_scheme() {
	let payload = sample_with("backend", "api_base", Value::String("10.0.0.2:5000".to_string()));

	assert_eq!(
		validation_message(load_payload(payload)),
		"backend.api_base must start with http:// or https://."
	);
}

#[test]
fn zero_listen_timeout_is_rejected() {
	let payload = sample_with("voice", "listen_timeout_ms", Value::Integer(0));

	assert_eq!(
		validation_message(load_payload(payload)),
		"voice.listen_timeout_ms must be greater than zero."
	);
}

#[test]
fn short_default_keyword_is_rejected() {
	let payload = sample_with("music", "default_keyword", Value::String("a".to_string()));

	assert_eq!(
		validation_message(load_payload(payload)),
		"music.default_keyword must be at least two characters."
	);
}

#[test]
fn non_string_default_header_is_rejected() {
	let payload = sample_with("backend.default_headers", "x-retry", Value::Integer(3));

	assert_eq!(
		validation_message(load_payload(payload)),
		"backend.default_headers.x-retry must be a string."
	);
}

#[test]
fn unknown_platform_fails_to_parse() {
	let payload = sample_with("device", "platform", Value::String("symbian".to_string()));

	assert!(matches!(load_payload(payload), Err(Error::ParseConfig { .. })));
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("ruby_config_test_missing.toml");

	assert!(matches!(ruby_config::load(&path), Err(Error::ReadConfig { .. })));
}

#[test]
fn contact_without_phone_is_rejected() {
	let mut contact = toml::map::Map::new();

	contact.insert("name".to_string(), Value::String("Mẹ".to_string()));
	contact.insert("phone".to_string(), Value::String(" ".to_string()));

	let payload = sample_with("device", "contacts", Value::Array(vec![Value::Table(contact)]));

	assert_eq!(
		validation_message(load_payload(payload)),
		"device.contacts[0] must have a name and a phone."
	);
}
