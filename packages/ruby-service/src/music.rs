use ruby_domain::music;

use crate::{Result, RubyService, conversation::Reply};

impl RubyService {
	/// Opens a YouTube search for a music request. A failed open is logged and the turn still
	/// replies.
	pub async fn music_reply(&self, message: &str) -> Result<Option<Reply>> {
		let Some(request) = music::match_music(message, &self.cfg.music) else {
			return Ok(None);
		};

		tracing::info!(keyword = %request.keyword, "Music request matched.");

		if let Err(err) = self.collaborators.urls.open_url(&request.url).await {
			tracing::warn!(url = %request.url, error = %err, "Failed to open music search.");
		}

		Ok(Some(Reply::text(request.reply())))
	}
}
