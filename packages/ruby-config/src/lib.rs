mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Backend, Config, Contact, Device, Music, Platform, Reminders, Service, Speech, Sqlite, Storage, Voice,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.path.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.sqlite.path must be non-empty.".to_string(),
		});
	}
	if cfg.storage.sqlite.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.sqlite.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !is_http_url(&cfg.backend.api_base) {
		return Err(Error::Validation {
			message: "backend.api_base must start with http:// or https://.".to_string(),
		});
	}
	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.backend.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("backend.default_headers.{key} must be a string."),
			});
		}
	}

	for (index, contact) in cfg.device.contacts.iter().enumerate() {
		if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("device.contacts[{index}] must have a name and a phone."),
			});
		}
	}

	if !is_http_url(&cfg.music.search_url) {
		return Err(Error::Validation {
			message: "music.search_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.music.default_keyword.trim().chars().count() < 2 {
		return Err(Error::Validation {
			message: "music.default_keyword must be at least two characters.".to_string(),
		});
	}
	if cfg.voice.locale.trim().is_empty() {
		return Err(Error::Validation { message: "voice.locale must be non-empty.".to_string() });
	}
	if cfg.voice.listen_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "voice.listen_timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [("speech.pitch", cfg.speech.pitch), ("speech.rate", cfg.speech.rate)] {
		if !value.is_finite() || value <= 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number greater than zero."),
			});
		}
	}

	if cfg.reminders.title.trim().is_empty() {
		return Err(Error::Validation {
			message: "reminders.title must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.device.default_city.as_deref().map(|city| city.trim().is_empty()).unwrap_or(false) {
		cfg.device.default_city = None;
	}

	let trimmed = cfg.backend.api_base.trim().trim_end_matches('/').to_string();

	cfg.backend.api_base = trimmed;
}

fn is_http_url(value: &str) -> bool {
	let value = value.trim();

	value.starts_with("http://") || value.starts_with("https://")
}
