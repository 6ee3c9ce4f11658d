use ruby_domain::{
	intent::{self, RemoteIntent},
	notes, time_expr,
};
use ruby_providers::chat::BotReply;
use ruby_storage::models::NewNote;

use crate::{Result, RubyService, conversation::Reply};

pub const CONNECTION_APOLOGY: &str = "Lỗi kết nối đến máy chủ. Vui lòng thử lại sau.";

impl RubyService {
	/// Sends the message to the backend endpoint of its intent, then files notes and reminders for
	/// the answer.
	///
	/// Backend failures are answered with [`CONNECTION_APOLOGY`]; storage failures propagate.
	pub async fn remote_reply(&self, message: &str) -> Result<Reply> {
		let intent = intent::classify(message);

		tracing::info!(intent = intent.as_str(), "Remote intent classified.");

		let city = match intent {
			RemoteIntent::Weather => self.current_city().await,
			_ => None,
		};
		let body = intent.request_body(message, city.as_deref());
		let api_base = self.effective_api_base().await;
		let bot = match self
			.collaborators
			.chat
			.send(&self.cfg.backend, &api_base, intent.path(), &body)
			.await
		{
			Ok(bot) => bot,
			Err(err) => {
				tracing::warn!(intent = intent.as_str(), error = %err, "Backend request failed.");

				return Ok(Reply::text(CONNECTION_APOLOGY));
			},
		};
		let (text, kind) = resolve_bot_reply(bot);
		let now = self.now();
		let parsed = time_expr::parse_time(message, now);
		let mut reply = Reply::text(text);

		if notes::confirms_reminder(&reply.text)
			&& !parsed.is_valid()
			&& let Some(delay) = notes::relative_delay_seconds(message)
			&& delay > 0
		{
			reply.notification_id = self.try_schedule_reminder(delay, message).await;
		}

		if !notes::is_note_worthy(message, kind.as_deref(), parsed.is_valid()) {
			return Ok(reply);
		}

		let content = notes::extract_note_content(message, &reply.text);
		let mut note = NewNote {
			title: notes::NOTE_TITLE.to_string(),
			content: content.clone(),
			reminder_time: None,
			reminder_date: None,
			created_at: now,
		};

		if let Some(at) = parsed.at(now.offset()) {
			let time_label = parsed.time_label();
			let delay = (at - now).whole_seconds();

			note.title = notes::REMINDER_NOTE_TITLE.to_string();
			note.reminder_time = Some(time_label.clone());
			note.reminder_date = Some(parsed.date_label());

			if delay > 0 {
				if let Some(id) = self.try_schedule_reminder(delay, &content).await {
					reply.notification_id = Some(id);
					reply.text = notes::with_clause(
						&reply.text,
						&notes::reminder_clause(&time_label, parsed.date),
					);
				}
			} else {
				tracing::info!(time = %time_label, "Reminder time has passed.");

				reply.text =
					notes::with_clause(&reply.text, &notes::passed_clause(&time_label, parsed.date));
			}
		}

		let note_id = ruby_storage::notes::insert_note(&self.db.pool, &note).await?;

		tracing::info!(note_id, "Note saved.");

		reply.note_id = Some(note_id);

		Ok(reply)
	}

	async fn current_city(&self) -> Option<String> {
		match self.collaborators.location.current_city().await {
			Ok(city) => city,
			Err(err) => {
				tracing::warn!(error = %err, "Failed to resolve the current city.");

				None
			},
		}
	}
}

/// Reply text and type of a backend answer. A bare `content` becomes a created-note reply.
fn resolve_bot_reply(bot: BotReply) -> (String, Option<String>) {
	let BotReply { reply, kind, content } = bot;

	if let Some(reply) = reply.filter(|reply| !reply.is_empty()) {
		return (reply, kind);
	}
	if let Some(content) = content.filter(|content| !content.is_empty()) {
		return (notes::note_created_reply(&content), Some(notes::NOTE_CREATED_TYPE.to_string()));
	}

	(notes::PROCESSED_REPLY.to_string(), kind)
}
