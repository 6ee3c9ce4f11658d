//! Device command matching.
//!
//! Matching is pure: [`match_device_command`] returns the command, and the caller performs the side
//! effect and renders the acknowledgment. Rules are evaluated in table order, so a message naming
//! both the flashlight and the volume only ever toggles the flashlight.

use crate::{
	dispatch::{self, Rule},
	text,
};

pub const BRIGHTNESS_STEP: f32 = 0.2;
pub const BRIGHTNESS_FLOOR: f32 = 0.1;
pub const BRIGHTNESS_CEILING: f32 = 1.0;

const LEVEL_PATTERN: &str = r"(?:mức|đặt|đến|tới)\s*([0-9]{1,3})\s*(%|phần trăm)?";
const BRIGHTNESS_QUERY_PATTERN: &str = r"((độ sáng|sáng màn hình|mức sáng).*(hiện tại|bao nhiêu|là bao nhiêu|là mấy|%)|bao nhiêu phần trăm độ sáng|sáng bao nhiêu)";
const VOLUME_QUERY_PATTERN: &str = r"((âm lượng|mức âm|mức âm thanh).*(hiện tại|bao nhiêu|là bao nhiêu|là mấy|%)|bao nhiêu phần trăm âm lượng|âm lượng bao nhiêu)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
	Flashlight(bool),
	Notifications(bool),
	SetVolume(u8),
	VolumeUp,
	VolumeDown,
	OpenNavigationBar,
	SetBrightness(u8),
	BrightnessUp,
	BrightnessDown,
	QueryBrightness,
	QueryVolume,
	/// Opens the Wi-Fi settings screen. `enable` only shapes the wording of the acknowledgment.
	WifiSettings {
		enable: bool,
	},
	BluetoothSettings {
		enable: bool,
	},
}
impl DeviceCommand {
	/// Fixed acknowledgment for commands whose reply does not depend on a device reading.
	/// Queries return `None`; render them with [`brightness_report`] or [`volume_report`].
	pub fn acknowledgment(&self) -> Option<String> {
		let ack = match self {
			Self::Flashlight(true) => "Đã bật đèn flash 🔦".to_string(),
			Self::Flashlight(false) => "Đã tắt đèn flash 🔦".to_string(),
			Self::Notifications(true) => "Đã bật thông báo 🛎️".to_string(),
			Self::Notifications(false) => "Đã tắt thông báo 🛎️".to_string(),
			Self::SetVolume(level) => format!("Đã đặt âm lượng đến mức {level}% 🔊"),
			Self::VolumeUp => "Đã tăng âm lượng 🔊".to_string(),
			Self::VolumeDown => "Đã giảm âm lượng 🔉".to_string(),
			Self::OpenNavigationBar => "Đã mở thanh điều hướng 📱".to_string(),
			Self::SetBrightness(level) => format!("Đã đặt độ sáng đến mức {level}% 🌞"),
			Self::BrightnessUp => "🌞 Đã tăng độ sáng.".to_string(),
			Self::BrightnessDown => "🌙 Đã giảm độ sáng.".to_string(),
			Self::WifiSettings { enable: true } => "🔌 Đang mở cài đặt WiFi để bạn bật.".to_string(),
			Self::WifiSettings { enable: false } => "🔌 Đang mở cài đặt WiFi để bạn tắt.".to_string(),
			Self::BluetoothSettings { enable: true } =>
				"📶 Đang mở cài đặt Bluetooth để bạn bật.".to_string(),
			Self::BluetoothSettings { enable: false } =>
				"📶 Đang mở cài đặt Bluetooth để bạn tắt.".to_string(),
			Self::QueryBrightness | Self::QueryVolume => return None,
		};

		Some(ack)
	}
}

/// Matches `message` against the device rule table. The message is normalized first.
pub fn match_device_command(message: &str) -> Option<DeviceCommand> {
	let normalized = text::normalize_command(message);

	dispatch::first_match(&device_rules(), &normalized).map(|(_, command)| command)
}

/// Same as [`match_device_command`] but also reports the name of the rule that matched.
pub fn match_device_rule(message: &str) -> Option<(&'static str, DeviceCommand)> {
	let normalized = text::normalize_command(message);

	dispatch::first_match(&device_rules(), &normalized)
}

/// First `mức|đặt|đến|tới N` level in the message, clamped to `0..=100`.
pub fn extract_level(normalized: &str) -> Option<u8> {
	let caps = text::captures(LEVEL_PATTERN, normalized)?;
	let level: u32 = caps.get(1)?.as_str().parse().ok()?;

	Some(level.min(100) as u8)
}

/// Next brightness after one step up or down, within `BRIGHTNESS_FLOOR..=BRIGHTNESS_CEILING`.
pub fn step_brightness(current: f32, up: bool) -> f32 {
	if up {
		(current + BRIGHTNESS_STEP).min(BRIGHTNESS_CEILING)
	} else {
		(current - BRIGHTNESS_STEP).max(BRIGHTNESS_FLOOR)
	}
}

pub fn brightness_report(level: Option<u8>) -> String {
	match level {
		Some(level) => format!("🌞 Độ sáng hiện tại là {level}%."),
		None => "Không thể lấy được độ sáng.".to_string(),
	}
}

pub fn volume_report(level: Option<u8>) -> String {
	match level {
		Some(level) => format!("🔊 Âm lượng hiện tại là {level}%."),
		None => "Không thể lấy được mức âm lượng.".to_string(),
	}
}

fn device_rules() -> Vec<Rule<DeviceCommand>> {
	vec![
		Rule {
			name: "flashlight_on",
			matches: |msg| msg.contains("bật đèn flash"),
			build: |_| DeviceCommand::Flashlight(true),
		},
		Rule {
			name: "flashlight_off",
			matches: |msg| msg.contains("tắt đèn flash"),
			build: |_| DeviceCommand::Flashlight(false),
		},
		Rule {
			name: "notifications_on",
			matches: |msg| msg.contains("bật thông báo"),
			build: |_| DeviceCommand::Notifications(true),
		},
		Rule {
			name: "notifications_off",
			matches: |msg| msg.contains("tắt thông báo"),
			build: |_| DeviceCommand::Notifications(false),
		},
		Rule {
			name: "volume_set",
			matches: |msg| msg.contains("âm lượng") && extract_level(msg).is_some(),
			build: |msg| DeviceCommand::SetVolume(extract_level(msg).unwrap_or_default()),
		},
		Rule {
			name: "volume_up",
			matches: |msg| msg.contains("âm lượng") && msg.contains("tăng"),
			build: |_| DeviceCommand::VolumeUp,
		},
		Rule {
			name: "volume_down",
			matches: |msg| msg.contains("âm lượng") && msg.contains("giảm"),
			build: |_| DeviceCommand::VolumeDown,
		},
		Rule {
			name: "navigation_bar",
			matches: |msg| msg.contains("mở thanh điều hướng"),
			build: |_| DeviceCommand::OpenNavigationBar,
		},
		Rule {
			name: "brightness_set",
			matches: |msg| msg.contains("độ sáng") && extract_level(msg).is_some(),
			build: |msg| DeviceCommand::SetBrightness(extract_level(msg).unwrap_or_default()),
		},
		Rule {
			name: "brightness_up",
			matches: |msg| msg.contains("độ sáng") && msg.contains("tăng"),
			build: |_| DeviceCommand::BrightnessUp,
		},
		Rule {
			name: "brightness_down",
			matches: |msg| msg.contains("độ sáng") && msg.contains("giảm"),
			build: |_| DeviceCommand::BrightnessDown,
		},
		Rule {
			name: "brightness_query",
			matches: |msg| text::is_match(BRIGHTNESS_QUERY_PATTERN, msg),
			build: |_| DeviceCommand::QueryBrightness,
		},
		Rule {
			name: "volume_query",
			matches: |msg| text::is_match(VOLUME_QUERY_PATTERN, msg),
			build: |_| DeviceCommand::QueryVolume,
		},
		Rule {
			name: "wifi_on",
			matches: |msg| text::contains_any(msg, &["bật wifi", "mở wifi"]),
			build: |_| DeviceCommand::WifiSettings { enable: true },
		},
		Rule {
			name: "wifi_off",
			matches: |msg| msg.contains("tắt wifi"),
			build: |_| DeviceCommand::WifiSettings { enable: false },
		},
		Rule {
			name: "bluetooth_on",
			matches: |msg| text::contains_any(msg, &["bật bluetooth", "mở bluetooth"]),
			build: |_| DeviceCommand::BluetoothSettings { enable: true },
		},
		Rule {
			name: "bluetooth_off",
			matches: |msg| msg.contains("tắt bluetooth"),
			build: |_| DeviceCommand::BluetoothSettings { enable: false },
		},
	]
}
