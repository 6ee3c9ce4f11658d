use ruby_storage::settings::{self, API_URL_KEY};

use crate::{Error, Result, RubyService};

impl RubyService {
	/// Backend base URL: the stored setting when present, else the configured default.
	pub async fn api_url(&self) -> Result<String> {
		let stored = settings::get_setting(&self.db.pool, API_URL_KEY).await?;

		Ok(stored
			.filter(|url| !url.trim().is_empty())
			.unwrap_or_else(|| self.cfg.backend.api_base.clone()))
	}

	/// Stores a new backend base URL and returns it as saved.
	pub async fn set_api_url(&self, url: &str) -> Result<String> {
		let url = url.trim().trim_end_matches('/');

		if !(url.starts_with("http://") || url.starts_with("https://")) {
			return Err(Error::InvalidRequest {
				message: "api_url must start with http:// or https://.".to_string(),
			});
		}

		settings::set_setting(&self.db.pool, API_URL_KEY, url).await?;

		tracing::info!(%url, "Backend URL updated.");

		Ok(url.to_string())
	}

	/// Base URL for one backend call. A settings read failure falls back to configuration.
	pub(crate) async fn effective_api_base(&self) -> String {
		match self.api_url().await {
			Ok(url) => url,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to read the backend URL setting.");

				self.cfg.backend.api_base.clone()
			},
		}
	}
}
