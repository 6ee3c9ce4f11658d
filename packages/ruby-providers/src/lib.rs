pub mod chat;

mod error;

pub use error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderName};
use serde_json::{Map, Value};

/// Converts configured default headers into a request header map. Values must be strings.
pub fn default_headers(configured: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	for (key, value) in configured {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header {key} must be a string."),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
