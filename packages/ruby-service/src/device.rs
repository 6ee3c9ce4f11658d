use ruby_domain::device::{self, DeviceCommand};

use crate::{Result, RubyService, SettingsScreen, conversation::Reply};

impl RubyService {
	/// Runs a matched device command against the device collaborator. Each call fires the side
	/// effect once, so repeating a command repeats the effect.
	pub async fn device_reply(&self, message: &str) -> Result<Option<Reply>> {
		let Some((rule, command)) = device::match_device_rule(message) else {
			return Ok(None);
		};

		tracing::debug!(rule, "Device rule matched.");

		let reply = self.run_device_command(command).await?;

		Ok(Some(Reply::text(reply)))
	}

	async fn run_device_command(&self, command: DeviceCommand) -> Result<String> {
		let control = &self.collaborators.device;

		match command {
			DeviceCommand::Flashlight(on) => control.set_flashlight(on).await?,
			DeviceCommand::Notifications(enabled) => control.set_notifications(enabled).await?,
			DeviceCommand::SetVolume(level) => control.set_volume(level).await?,
			DeviceCommand::VolumeUp => control.step_volume(true).await?,
			DeviceCommand::VolumeDown => control.step_volume(false).await?,
			DeviceCommand::OpenNavigationBar => control.open_navigation_bar().await?,
			DeviceCommand::SetBrightness(level) =>
				control.set_brightness(f32::from(level) / 100.0).await?,
			DeviceCommand::BrightnessUp | DeviceCommand::BrightnessDown => {
				let current = control.brightness().await?;
				let up = command == DeviceCommand::BrightnessUp;

				control.set_brightness(device::step_brightness(current, up)).await?;
			},
			DeviceCommand::QueryBrightness => {
				let level = match control.brightness().await {
					Ok(level) => Some((level.clamp(0.0, 1.0) * 100.0).round() as u8),
					Err(err) => {
						tracing::warn!(error = %err, "Failed to read brightness.");

						None
					},
				};

				return Ok(device::brightness_report(level));
			},
			DeviceCommand::QueryVolume => {
				let level = match control.volume().await {
					Ok(level) => Some(level.min(100)),
					Err(err) => {
						tracing::warn!(error = %err, "Failed to read volume.");

						None
					},
				};

				return Ok(device::volume_report(level));
			},
			DeviceCommand::WifiSettings { .. } =>
				control.open_settings(SettingsScreen::Wifi).await?,
			DeviceCommand::BluetoothSettings { .. } =>
				control.open_settings(SettingsScreen::Bluetooth).await?,
		}

		Ok(command.acknowledgment().unwrap_or_default())
	}
}
