use serde::Serialize;

use ruby_domain::{
	apps::{self, OpenCommand},
	calls::{self, CallCommand, CallTarget},
	music,
};

use crate::{ConfirmOutcome, Result, RubyService, conversation::Reply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppLaunch {
	pub opened: bool,
	pub app_name: String,
}

impl RubyService {
	pub async fn app_reply(&self, message: &str) -> Result<Option<Reply>> {
		if let Some(command) = calls::parse_call_command(message) {
			return Ok(Some(Reply::text(self.call_reply(command).await)));
		}

		let reply = match apps::parse_open_command(message) {
			None => return Ok(None),
			Some(OpenCommand::MissingName) => apps::missing_name_reply(),
			Some(OpenCommand::App { name }) => {
				let launch = self.launch_app(&name, alerts_unknown(message)).await;

				if !launch.opened {
					return Ok(None);
				}

				apps::opened_reply(&launch.app_name)
			},
		};

		Ok(Some(Reply::text(reply)))
	}

	/// Opens the app named by a `mở …` message. Unknown names come back with `opened = false` and
	/// an alert, unless the message is a music request.
	pub async fn check_and_open_app(&self, message: &str) -> AppLaunch {
		match apps::parse_open_command(message) {
			Some(OpenCommand::App { name }) => self.launch_app(&name, alerts_unknown(message)).await,
			_ => AppLaunch { opened: false, app_name: String::new() },
		}
	}

	/// Opens `name` directly, alerting the user when the name is not in the app table.
	pub async fn open_app_by_name(&self, name: &str) -> bool {
		self.launch_app(name, true).await.opened
	}

	/// Resolves a call command to a number and dials it once the user confirms.
	pub async fn call_reply(&self, command: CallCommand) -> String {
		let target = match command {
			CallCommand::Emergency(service) => {
				tracing::info!(number = service.number(), "Emergency call requested.");

				CallTarget::Emergency(service)
			},
			CallCommand::Number(raw) => {
				let number = calls::clean_phone_number(&raw);

				if !calls::is_valid_phone_number(&number) {
					return calls::invalid_phone_reply(&number);
				}

				CallTarget::Number(number)
			},
			CallCommand::Contact(query) => {
				let contacts = match self.collaborators.contacts.list().await {
					Ok(contacts) => contacts,
					Err(err) => {
						tracing::warn!(error = %err, "Failed to read contacts.");

						Vec::new()
					},
				};
				let Some(contact) = calls::find_contact(&contacts, &query) else {
					return calls::contact_not_found_reply(&query);
				};
				let Some(raw) = contact.phone_numbers.first() else {
					return calls::contact_not_found_reply(&query);
				};
				let number = calls::clean_phone_number(raw);

				if !calls::is_valid_phone_number(&number) {
					return calls::invalid_phone_reply(raw);
				}

				CallTarget::Contact { name: contact.name.clone(), number }
			},
		};

		self.dial(&target).await
	}

	async fn launch_app(&self, name: &str, alert_unknown: bool) -> AppLaunch {
		let app_name = name.trim().to_string();
		let Some(entry) = apps::lookup(&app_name) else {
			tracing::debug!(app = %app_name, "App is not in the scheme table.");

			if alert_unknown {
				self.alert(apps::unsupported_app_alert(&app_name)).await;
			}

			return AppLaunch { opened: false, app_name };
		};
		let urls = &self.collaborators.urls;
		let err = match urls.open_url(entry.scheme(self.cfg.device.platform)).await {
			Ok(()) => return AppLaunch { opened: true, app_name },
			Err(err) => err,
		};

		tracing::warn!(app = entry.name, error = %err, "App scheme failed to open.");

		let err = match entry.fallback {
			Some(fallback) => match urls.open_url(fallback).await {
				Ok(()) => return AppLaunch { opened: true, app_name },
				Err(err) => err,
			},
			None => err,
		};

		self.alert(apps::open_failed_alert(&app_name, &err.to_string())).await;

		AppLaunch { opened: false, app_name }
	}

	async fn dial(&self, target: &CallTarget) -> String {
		let (title, prompt) = target.prompt();

		match self.collaborators.confirmer.confirm(&title, &prompt).await {
			ConfirmOutcome::Accepted => match self.collaborators.urls.open_url(&target.tel_url()).await {
				Ok(()) => target.calling_reply(),
				Err(err) => {
					tracing::warn!(error = %err, "Failed to start the call.");

					target.failed_reply(&err.to_string())
				},
			},
			ConfirmOutcome::Declined | ConfirmOutcome::Dismissed => target.cancelled_reply(),
		}
	}
}

// `mở nhạc …` parses as an app name but belongs to the music stage.
fn alerts_unknown(message: &str) -> bool {
	!music::is_music_request(message)
}
