use std::sync::Arc;

use tokio::sync::Mutex;

use ruby_service::{Conversation, RubyService};
use ruby_storage::db::Db;

use crate::headless;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RubyService>,
	/// The single chat session. Turns are serialized behind this lock.
	pub conversation: Arc<Mutex<Conversation>>,
}
impl AppState {
	pub async fn new(config: ruby_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.sqlite).await?;

		db.ensure_schema().await?;

		let collaborators = headless::collaborators(&config);
		let service = RubyService::new(config, db, collaborators);

		Ok(Self::with_service(service))
	}

	pub fn with_service(service: RubyService) -> Self {
		let conversation = Conversation::new().on_error(|err| {
			tracing::debug!(error = %err, "Chat turn reported an error.");
		});

		Self { service: Arc::new(service), conversation: Arc::new(Mutex::new(conversation)) }
	}
}
