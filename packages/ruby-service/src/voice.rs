//! Voice capture session around a speech recognizer.
//!
//! The session keeps two guards: `transitioning` while a start or stop is in flight and `open`
//! while recognition runs. A start or stop that arrives while guarded does nothing. Listening
//! stops on its own after `voice.listen_timeout_ms` unless the recognizer ends, fails, or delivers
//! results first.
//!
//! Cancel and destroy bump an epoch. A start that was in flight when the epoch moved releases the
//! recognizer again instead of opening the session, and it keeps the transition guard until then.

use std::{
	future::Future,
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{Alerts, BoxFuture, Error, Result};

pub const UNAVAILABLE_MESSAGE: &str = "Thiết bị không hỗ trợ nhận dạng giọng nói";
pub const VOICE_ERROR_TITLE: &str = "Lỗi nhận dạng giọng nói";

const NO_MATCH_CODE: &str = "7";

pub trait Recognizer
where
	Self: Send + Sync,
{
	fn is_available(&self) -> BoxFuture<'_, Result<bool>>;

	fn start<'a>(&'a self, locale: &'a str) -> BoxFuture<'a, Result<()>>;

	fn stop(&self) -> BoxFuture<'_, Result<()>>;

	fn cancel(&self) -> BoxFuture<'_, Result<()>>;

	fn destroy(&self) -> BoxFuture<'_, Result<()>>;
}

/// Events delivered by the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
	Start,
	End,
	PartialResults(Vec<String>),
	Results(Vec<String>),
	Error { code: Option<String>, message: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceSnapshot {
	pub listening: bool,
	pub partial_transcript: String,
	pub results: Vec<String>,
	pub error: Option<String>,
}

#[derive(Default)]
struct VoiceState {
	transitioning: bool,
	open: bool,
	partial_transcript: String,
	results: Vec<String>,
	error: Option<String>,
	timeout: Option<JoinHandle<()>>,
	epoch: u64,
}
impl VoiceState {
	fn disarm(&mut self) {
		if let Some(handle) = self.timeout.take() {
			handle.abort();
		}
	}

	fn invalidate(&mut self) {
		self.disarm();

		self.epoch = self.epoch.wrapping_add(1);
	}

	/// Clears the session. The transition guard still belongs to any start or stop in flight.
	fn reset(&mut self) {
		self.disarm();

		let (transitioning, epoch) = (self.transitioning, self.epoch);

		*self = Self { transitioning, epoch, ..Self::default() };
	}
}

#[derive(Clone)]
pub struct VoiceSession {
	recognizer: Arc<dyn Recognizer>,
	alerts: Arc<dyn Alerts>,
	locale: String,
	listen_timeout: Duration,
	state: Arc<Mutex<VoiceState>>,
}
impl VoiceSession {
	pub fn new(
		recognizer: Arc<dyn Recognizer>,
		alerts: Arc<dyn Alerts>,
		cfg: &ruby_config::Voice,
	) -> Self {
		Self {
			recognizer,
			alerts,
			locale: cfg.locale.clone(),
			listen_timeout: Duration::from_millis(cfg.listen_timeout_ms),
			state: Arc::new(Mutex::new(VoiceState::default())),
		}
	}

	pub fn snapshot(&self) -> VoiceSnapshot {
		let state = self.lock();

		VoiceSnapshot {
			listening: state.open,
			partial_transcript: state.partial_transcript.clone(),
			results: state.results.clone(),
			error: state.error.clone(),
		}
	}

	/// Starts listening. Returns `false` when the call was ignored or the recognizer could not
	/// start; start failures are alerted to the user.
	pub async fn start(&self) -> bool {
		let epoch = {
			let mut state = self.lock();

			if state.transitioning || state.open {
				tracing::debug!("Voice start ignored while busy.");

				return false;
			}

			state.transitioning = true;
			state.partial_transcript.clear();
			state.results.clear();
			state.error = None;

			state.epoch
		};

		if let Err(err) = self.start_recognizer().await {
			tracing::warn!(error = %err, "Voice recognition failed to start.");

			let message = match &err {
				Error::Unavailable { .. } => UNAVAILABLE_MESSAGE.to_string(),
				other => other.to_string(),
			};
			let current = {
				let mut state = self.lock();

				state.transitioning = false;

				if state.epoch == epoch {
					state.error = Some(message.clone());
				}

				state.epoch == epoch
			};

			if current {
				self.alerts.alert(VOICE_ERROR_TITLE, &message).await;
			}

			return false;
		}

		{
			let timer = self.clone();
			let mut state = self.lock();

			if state.epoch == epoch {
				state.transitioning = false;
				state.open = true;
				state.timeout = Some(tokio::spawn(async move {
					tokio::time::sleep(timer.listen_timeout).await;

					tracing::info!("Voice listening timed out.");

					// Detach instead of aborting: this task is the timer.
					timer.lock().timeout.take();
					timer.stop().await;
				}));

				tracing::info!(locale = %self.locale, "Voice listening started.");

				return true;
			}
		}

		tracing::info!("Voice start superseded by a release.");

		if let Err(err) = self.recognizer.cancel().await {
			tracing::warn!(error = %err, "Voice recognizer failed to cancel.");
		}

		self.lock().transitioning = false;

		false
	}

	/// Stops listening and keeps the collected results. Returns `false` when ignored.
	pub async fn stop(&self) -> bool {
		{
			let mut state = self.lock();

			if state.transitioning || !state.open {
				return false;
			}

			state.transitioning = true;
			state.disarm();
		}

		if let Err(err) = self.recognizer.stop().await {
			tracing::warn!(error = %err, "Voice recognizer failed to stop.");
		}

		let mut state = self.lock();

		state.transitioning = false;
		state.open = false;
		state.partial_transcript.clear();

		tracing::info!("Voice listening stopped.");

		true
	}

	/// Abandons the current recognition and resets the session.
	pub async fn cancel(&self) {
		self.lock().invalidate();

		if let Err(err) = self.recognizer.cancel().await {
			tracing::warn!(error = %err, "Voice recognizer failed to cancel.");
		}

		self.lock().reset();
	}

	/// Releases the recognizer and resets the session.
	pub async fn destroy(&self) {
		self.lock().invalidate();

		if let Err(err) = self.recognizer.destroy().await {
			tracing::warn!(error = %err, "Voice recognizer failed to release.");
		}

		self.lock().reset();

		tracing::debug!("Voice session destroyed.");
	}

	pub async fn handle_event(&self, event: VoiceEvent) {
		let alert = {
			let mut state = self.lock();

			match event {
				VoiceEvent::Start => {
					state.open = true;
					state.error = None;

					None
				},
				VoiceEvent::End => {
					state.disarm();
					state.open = false;
					state.partial_transcript.clear();

					None
				},
				VoiceEvent::PartialResults(values) => {
					if let Some(first) = values.into_iter().next() {
						state.partial_transcript = first;
					}

					None
				},
				VoiceEvent::Results(values) => {
					state.disarm();
					state.partial_transcript.clear();

					if !values.is_empty() {
						state.results = values;
					}

					None
				},
				VoiceEvent::Error { code, message } => {
					state.disarm();
					state.open = false;
					state.partial_transcript.clear();
					state.error = Some(message.unwrap_or_else(|| VOICE_ERROR_TITLE.to_string()));

					let code = code.unwrap_or_default();

					tracing::warn!(%code, "Voice recognition error.");

					(code != NO_MATCH_CODE).then(|| error_message(&code))
				},
			}
		};

		if let Some(message) = alert {
			self.alerts.alert(VOICE_ERROR_TITLE, message).await;
		}
	}

	async fn start_recognizer(&self) -> Result<()> {
		if !self.recognizer.is_available().await? {
			return Err(Error::Unavailable { message: UNAVAILABLE_MESSAGE.to_string() });
		}

		self.recognizer.start(&self.locale).await
	}

	fn lock(&self) -> MutexGuard<'_, VoiceState> {
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

/// Runs `f` with a fresh session and destroys the session afterwards, whatever `f` returned.
pub async fn with_voice_session<F, Fut, T>(
	recognizer: Arc<dyn Recognizer>,
	alerts: Arc<dyn Alerts>,
	cfg: &ruby_config::Voice,
	f: F,
) -> T
where
	F: FnOnce(VoiceSession) -> Fut,
	Fut: Future<Output = T>,
{
	let session = VoiceSession::new(recognizer, alerts, cfg);
	let out = f(session.clone()).await;

	session.destroy().await;

	out
}

/// Vietnamese message for a recognizer error code.
pub fn error_message(code: &str) -> &'static str {
	match code {
		"1" => "Lỗi mạng. Vui lòng kiểm tra kết nối internet.",
		"2" => "Lỗi âm thanh. Vui lòng kiểm tra microphone.",
		"3" => "Lỗi máy chủ. Vui lòng thử lại sau.",
		"4" => "Không có quyền truy cập microphone.",
		"5" => "Dịch vụ nhận dạng giọng nói không khả dụng.",
		"6" => "Không đủ bộ nhớ.",
		"7" => "Không nhận dạng được giọng nói. Vui lòng nói rõ hơn.",
		"8" => "Dịch vụ bận. Vui lòng thử lại.",
		"9" => "Dữ liệu không đủ để nhận dạng.",
		_ => "Đã xảy ra lỗi không xác định.",
	}
}
