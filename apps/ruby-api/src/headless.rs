//! Collaborators for running the assistant without a phone attached.
//!
//! Device state is simulated in memory, side effects are logged, and reminders fire as log events
//! from a timer task. Contacts come from the config file. Confirmation prompts cannot be answered
//! over HTTP and resolve as dismissed.

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use uuid::Uuid;

use ruby_service::{
	Alerts, BoxFuture, Collaborators, ConfirmOutcome, Confirmer, Contact, Contacts, DeviceControl,
	LocationProvider, NotificationRequest, NotificationScheduler, Result, SettingsScreen, Speaker,
	UrlOpener,
};

const VOLUME_STEP: u8 = 10;

pub fn collaborators(config: &ruby_config::Config) -> Collaborators {
	Collaborators::new(
		Arc::new(SimulatedDevice::default()),
		Arc::new(LoggedUrls),
		Arc::new(LoggedSpeaker),
		Arc::new(TimerNotifications),
		Arc::new(ConfiguredLocation(config.device.default_city.clone())),
		Arc::new(LoggedAlerts),
		Arc::new(DismissedConfirmer),
	)
	.with_contacts(Arc::new(ConfiguredContacts::new(&config.device.contacts)))
}

struct DeviceState {
	flashlight: bool,
	notifications: bool,
	volume: u8,
	brightness: f32,
}

pub struct SimulatedDevice {
	state: Mutex<DeviceState>,
}
impl SimulatedDevice {
	fn update(&self, change: impl FnOnce(&mut DeviceState)) -> BoxFuture<'_, Result<()>> {
		let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

		change(&mut state);

		tracing::info!(
			flashlight = state.flashlight,
			notifications = state.notifications,
			volume = state.volume,
			brightness = state.brightness,
			"Device state changed."
		);

		Box::pin(async { Ok(()) })
	}

	fn read<T>(&self, read: impl FnOnce(&DeviceState) -> T) -> T {
		read(&self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
	}
}
impl Default for SimulatedDevice {
	fn default() -> Self {
		Self {
			state: Mutex::new(DeviceState {
				flashlight: false,
				notifications: true,
				volume: 50,
				brightness: 0.5,
			}),
		}
	}
}
impl DeviceControl for SimulatedDevice {
	fn set_flashlight(&self, on: bool) -> BoxFuture<'_, Result<()>> {
		self.update(|state| state.flashlight = on)
	}

	fn set_notifications(&self, enabled: bool) -> BoxFuture<'_, Result<()>> {
		self.update(|state| state.notifications = enabled)
	}

	fn set_volume(&self, level: u8) -> BoxFuture<'_, Result<()>> {
		self.update(|state| state.volume = level.min(100))
	}

	fn step_volume(&self, up: bool) -> BoxFuture<'_, Result<()>> {
		self.update(|state| {
			state.volume = if up {
				state.volume.saturating_add(VOLUME_STEP).min(100)
			} else {
				state.volume.saturating_sub(VOLUME_STEP)
			};
		})
	}

	fn open_navigation_bar(&self) -> BoxFuture<'_, Result<()>> {
		tracing::info!("Navigation bar opened.");

		Box::pin(async { Ok(()) })
	}

	fn brightness(&self) -> BoxFuture<'_, Result<f32>> {
		let level = self.read(|state| state.brightness);

		Box::pin(async move { Ok(level) })
	}

	fn set_brightness(&self, level: f32) -> BoxFuture<'_, Result<()>> {
		self.update(|state| state.brightness = level.clamp(0.0, 1.0))
	}

	fn volume(&self) -> BoxFuture<'_, Result<u8>> {
		let level = self.read(|state| state.volume);

		Box::pin(async move { Ok(level) })
	}

	fn open_settings(&self, screen: SettingsScreen) -> BoxFuture<'_, Result<()>> {
		tracing::info!(?screen, "Settings screen opened.");

		Box::pin(async { Ok(()) })
	}
}

struct LoggedUrls;
impl UrlOpener for LoggedUrls {
	fn open_url<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<()>> {
		tracing::info!(%url, "Opening URL.");

		Box::pin(async { Ok(()) })
	}
}

struct LoggedSpeaker;
impl Speaker for LoggedSpeaker {
	fn speak<'a>(
		&'a self,
		text: &'a str,
		cfg: &'a ruby_config::Speech,
	) -> BoxFuture<'a, Result<()>> {
		tracing::info!(language = %cfg.language, %text, "Speaking.");

		Box::pin(async { Ok(()) })
	}
}

struct TimerNotifications;
impl NotificationScheduler for TimerNotifications {
	fn schedule<'a>(&'a self, request: &'a NotificationRequest) -> BoxFuture<'a, Result<String>> {
		let id = Uuid::new_v4().to_string();
		let request = request.clone();

		Box::pin(async move {
			let task_id = id.clone();

			tokio::spawn(async move {
				tokio::time::sleep(Duration::from_secs(request.delay_seconds)).await;

				tracing::info!(
					id = %task_id,
					title = %request.title,
					body = %request.body,
					"Reminder due."
				);
			});

			Ok(id)
		})
	}
}

struct ConfiguredLocation(Option<String>);
impl LocationProvider for ConfiguredLocation {
	fn current_city(&self) -> BoxFuture<'_, Result<Option<String>>> {
		let city = self.0.clone();

		Box::pin(async move { Ok(city) })
	}
}

struct ConfiguredContacts(Vec<Contact>);
impl ConfiguredContacts {
	fn new(entries: &[ruby_config::Contact]) -> Self {
		Self(
			entries
				.iter()
				.map(|entry| Contact {
					name: entry.name.clone(),
					phone_numbers: vec![entry.phone.clone()],
				})
				.collect(),
		)
	}
}
impl Contacts for ConfiguredContacts {
	fn list(&self) -> BoxFuture<'_, Result<Vec<Contact>>> {
		let contacts = self.0.clone();

		Box::pin(async move { Ok(contacts) })
	}
}

struct LoggedAlerts;
impl Alerts for LoggedAlerts {
	fn alert<'a>(&'a self, title: &'a str, message: &'a str) -> BoxFuture<'a, ()> {
		tracing::warn!(%title, %message, "User alert.");

		Box::pin(async {})
	}
}

struct DismissedConfirmer;
impl Confirmer for DismissedConfirmer {
	fn confirm<'a>(&'a self, title: &'a str, message: &'a str) -> BoxFuture<'a, ConfirmOutcome> {
		tracing::info!(%title, %message, "Confirmation dismissed.");

		Box::pin(async { ConfirmOutcome::Dismissed })
	}
}
