//! Turn orchestration for one chat session.
//!
//! A turn walks the stages in order and stops at the first one that produces a reply. Device
//! commands are checked before app launches, app launches before music, and anything left over
//! goes to the remote backend, which always answers.

use serde::Serialize;

use ruby_storage::{chat, models::Sender};

use crate::{BoxFuture, Error, Result, RubyService};

pub const TURN_FAILED_REPLY: &str = "Xin lỗi, đã xảy ra lỗi khi xử lý yêu cầu của bạn.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
	Received,
	DeviceChecked,
	AppCheckChecked,
	MusicChecked,
	RemoteClassified,
	RepliedAndSpoken,
	Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
	pub id: u64,
	pub text: String,
	pub sender: Sender,
}

/// Reply produced by a stage, with the records it created along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
	pub text: String,
	pub note_id: Option<i64>,
	pub notification_id: Option<String>,
}
impl Reply {
	pub fn text(text: impl Into<String>) -> Self {
		Self { text: text.into(), ..Default::default() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
	pub reply: String,
	pub state: TurnState,
	pub handled_by: Option<&'static str>,
	pub note_id: Option<i64>,
	pub notification_id: Option<String>,
}

type StageFn = for<'a> fn(&'a RubyService, &'a str) -> BoxFuture<'a, Result<Option<Reply>>>;

struct Stage {
	name: &'static str,
	/// State reached when this stage declines the message.
	passed: TurnState,
	run: StageFn,
}

type ErrorCallback = Box<dyn Fn(&Error) + Send + Sync>;

/// In-memory message list of the active session plus the turn driver.
#[derive(Default)]
pub struct Conversation {
	messages: Vec<Message>,
	next_id: u64,
	on_error: Option<ErrorCallback>,
}
impl Conversation {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a callback invoked with the error of every failed turn.
	pub fn on_error(mut self, callback: impl Fn(&Error) + Send + Sync + 'static) -> Self {
		self.on_error = Some(Box::new(callback));

		self
	}

	pub fn messages(&self) -> &[Message] {
		&self.messages
	}

	/// Runs one turn. Blank input is ignored and yields `None`.
	///
	/// Errors never escape: a failed turn is logged, answered with [`TURN_FAILED_REPLY`], and
	/// reported to the error callback.
	pub async fn handle_send(&mut self, service: &RubyService, text: &str) -> Option<TurnOutcome> {
		let text = text.trim();

		if text.is_empty() {
			return None;
		}

		self.push(text, Sender::User);

		match self.run_turn(service, text).await {
			Ok(outcome) => Some(outcome),
			Err(err) => {
				tracing::error!(error = %err, "Turn failed.");

				self.push(TURN_FAILED_REPLY, Sender::Bot);

				if let Some(callback) = &self.on_error {
					callback(&err);
				}

				Some(TurnOutcome {
					reply: TURN_FAILED_REPLY.to_string(),
					state: TurnState::Failed,
					handled_by: None,
					note_id: None,
					notification_id: None,
				})
			},
		}
	}

	async fn run_turn(&mut self, service: &RubyService, text: &str) -> Result<TurnOutcome> {
		chat::insert_message(&service.db.pool, Sender::User, text, service.now()).await?;

		let mut state = TurnState::Received;
		let mut handled = None;

		for stage in stages() {
			if let Some(reply) = (stage.run)(service, text).await? {
				tracing::info!(stage = stage.name, from = ?state, "Stage replied.");

				handled = Some((stage.name, reply));

				break;
			}

			state = stage.passed;
		}

		let Some((stage, reply)) = handled else {
			return Err(Error::InvalidRequest { message: "No stage produced a reply.".to_string() });
		};

		if !reply.text.is_empty()
			&& let Err(err) =
				service.collaborators.speaker.speak(&reply.text, &service.cfg.speech).await
		{
			tracing::warn!(error = %err, "Speech failed.");
		}

		chat::insert_message(&service.db.pool, Sender::Bot, &reply.text, service.now()).await?;

		self.push(&reply.text, Sender::Bot);

		Ok(TurnOutcome {
			reply: reply.text,
			state: TurnState::RepliedAndSpoken,
			handled_by: Some(stage),
			note_id: reply.note_id,
			notification_id: reply.notification_id,
		})
	}

	fn push(&mut self, text: &str, sender: Sender) {
		self.next_id += 1;

		self.messages.push(Message { id: self.next_id, text: text.to_string(), sender });
	}
}

fn stages() -> [Stage; 4] {
	[
		Stage { name: "device", passed: TurnState::DeviceChecked, run: device_stage },
		Stage { name: "app", passed: TurnState::AppCheckChecked, run: app_stage },
		Stage { name: "music", passed: TurnState::MusicChecked, run: music_stage },
		Stage { name: "remote", passed: TurnState::RemoteClassified, run: remote_stage },
	]
}

fn device_stage<'a>(
	service: &'a RubyService,
	text: &'a str,
) -> BoxFuture<'a, Result<Option<Reply>>> {
	Box::pin(service.device_reply(text))
}

fn app_stage<'a>(service: &'a RubyService, text: &'a str) -> BoxFuture<'a, Result<Option<Reply>>> {
	Box::pin(service.app_reply(text))
}

fn music_stage<'a>(
	service: &'a RubyService,
	text: &'a str,
) -> BoxFuture<'a, Result<Option<Reply>>> {
	Box::pin(service.music_reply(text))
}

fn remote_stage<'a>(
	service: &'a RubyService,
	text: &'a str,
) -> BoxFuture<'a, Result<Option<Reply>>> {
	Box::pin(async move { service.remote_reply(text).await.map(Some) })
}
