pub mod apps;
pub mod conversation;
pub mod device;
pub mod history;
pub mod music;
pub mod notes;
pub mod reminders;
pub mod remote;
pub mod settings;
pub mod voice;

mod error;

pub use conversation::{Conversation, Message, TurnOutcome, TurnState};
pub use error::{Error, Result};
pub use history::{HistoryItem, HistoryRequest, HistoryResponse};
pub use notes::{NoteItem, NotesRequest, NotesResponse};
pub use ruby_domain::calls::Contact;
pub use voice::{Recognizer, VoiceEvent, VoiceSession, VoiceSnapshot};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use time::OffsetDateTime;

use ruby_config::Config;
use ruby_providers::chat::{self, BotReply};
use ruby_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Settings screens the assistant can open on the user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScreen {
	Wifi,
	Bluetooth,
}

/// One-shot local notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NotificationRequest {
	pub title: String,
	pub body: String,
	pub delay_seconds: u64,
	pub repeats: bool,
}

/// Resolution of a confirmation prompt. Closing the prompt without choosing is `Dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
	Accepted,
	Declined,
	Dismissed,
}

pub trait DeviceControl
where
	Self: Send + Sync,
{
	fn set_flashlight(&self, on: bool) -> BoxFuture<'_, Result<()>>;

	fn set_notifications(&self, enabled: bool) -> BoxFuture<'_, Result<()>>;

	fn set_volume(&self, level: u8) -> BoxFuture<'_, Result<()>>;

	fn step_volume(&self, up: bool) -> BoxFuture<'_, Result<()>>;

	fn open_navigation_bar(&self) -> BoxFuture<'_, Result<()>>;

	/// Screen brightness in `0.0..=1.0`.
	fn brightness(&self) -> BoxFuture<'_, Result<f32>>;

	fn set_brightness(&self, level: f32) -> BoxFuture<'_, Result<()>>;

	/// Media volume in percent.
	fn volume(&self) -> BoxFuture<'_, Result<u8>>;

	fn open_settings(&self, screen: SettingsScreen) -> BoxFuture<'_, Result<()>>;
}

pub trait UrlOpener
where
	Self: Send + Sync,
{
	fn open_url<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<()>>;
}

pub trait Speaker
where
	Self: Send + Sync,
{
	fn speak<'a>(&'a self, text: &'a str, cfg: &'a ruby_config::Speech)
	-> BoxFuture<'a, Result<()>>;
}

pub trait NotificationScheduler
where
	Self: Send + Sync,
{
	/// Schedules `request` and returns the platform notification id.
	fn schedule<'a>(&'a self, request: &'a NotificationRequest) -> BoxFuture<'a, Result<String>>;
}

pub trait LocationProvider
where
	Self: Send + Sync,
{
	fn current_city(&self) -> BoxFuture<'_, Result<Option<String>>>;
}

pub trait Alerts
where
	Self: Send + Sync,
{
	fn alert<'a>(&'a self, title: &'a str, message: &'a str) -> BoxFuture<'a, ()>;
}

pub trait Confirmer
where
	Self: Send + Sync,
{
	fn confirm<'a>(&'a self, title: &'a str, message: &'a str) -> BoxFuture<'a, ConfirmOutcome>;
}

/// The phone's address book.
pub trait Contacts
where
	Self: Send + Sync,
{
	fn list(&self) -> BoxFuture<'_, Result<Vec<Contact>>>;
}

pub trait ChatBackend
where
	Self: Send + Sync,
{
	fn send<'a>(
		&'a self,
		cfg: &'a ruby_config::Backend,
		api_base: &'a str,
		path: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, ruby_providers::Result<BotReply>>;
}

pub trait Clock
where
	Self: Send + Sync,
{
	fn now(&self) -> OffsetDateTime;
}

#[derive(Clone)]
pub struct Collaborators {
	pub device: Arc<dyn DeviceControl>,
	pub urls: Arc<dyn UrlOpener>,
	pub speaker: Arc<dyn Speaker>,
	pub notifications: Arc<dyn NotificationScheduler>,
	pub location: Arc<dyn LocationProvider>,
	pub alerts: Arc<dyn Alerts>,
	pub confirmer: Arc<dyn Confirmer>,
	pub contacts: Arc<dyn Contacts>,
	pub chat: Arc<dyn ChatBackend>,
	pub clock: Arc<dyn Clock>,
}
impl Collaborators {
	/// Platform collaborators plus the HTTP chat backend, the system clock, and an empty address
	/// book.
	pub fn new(
		device: Arc<dyn DeviceControl>,
		urls: Arc<dyn UrlOpener>,
		speaker: Arc<dyn Speaker>,
		notifications: Arc<dyn NotificationScheduler>,
		location: Arc<dyn LocationProvider>,
		alerts: Arc<dyn Alerts>,
		confirmer: Arc<dyn Confirmer>,
	) -> Self {
		let defaults = Arc::new(DefaultCollaborators);

		Self {
			device,
			urls,
			speaker,
			notifications,
			location,
			alerts,
			confirmer,
			contacts: defaults.clone(),
			chat: defaults.clone(),
			clock: defaults,
		}
	}

	pub fn with_chat_backend(mut self, chat: Arc<dyn ChatBackend>) -> Self {
		self.chat = chat;

		self
	}

	pub fn with_contacts(mut self, contacts: Arc<dyn Contacts>) -> Self {
		self.contacts = contacts;

		self
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}
}

/// Assistant context built once at startup and shared by `Arc`.
pub struct RubyService {
	pub cfg: Config,
	pub db: Db,
	pub collaborators: Collaborators,
}
impl RubyService {
	pub fn new(cfg: Config, db: Db, collaborators: Collaborators) -> Self {
		Self { cfg, db, collaborators }
	}

	pub fn now(&self) -> OffsetDateTime {
		self.collaborators.clock.now()
	}

	pub(crate) async fn alert(&self, (title, message): (String, String)) {
		self.collaborators.alerts.alert(&title, &message).await;
	}
}

struct DefaultCollaborators;

impl ChatBackend for DefaultCollaborators {
	fn send<'a>(
		&'a self,
		cfg: &'a ruby_config::Backend,
		api_base: &'a str,
		path: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, ruby_providers::Result<BotReply>> {
		Box::pin(chat::post_json(cfg, api_base, path, body))
	}
}

impl Contacts for DefaultCollaborators {
	fn list(&self) -> BoxFuture<'_, Result<Vec<Contact>>> {
		Box::pin(async { Ok(Vec::new()) })
	}
}

impl Clock for DefaultCollaborators {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
	}
}
