use time::macros::datetime;

use ruby_domain::{
	apps::{self, OpenCommand},
	calls::{self, CallCommand, EmergencyService},
	device::{self, DeviceCommand},
	intent::{self, RemoteIntent},
	music, notes, time_expr,
};

#[test]
fn device_table_order_decides_mixed_commands() {
	assert_eq!(
		device::match_device_command("Bật đèn flash và tăng âm lượng"),
		Some(DeviceCommand::Flashlight(true))
	);
	assert_eq!(device::match_device_command("kể chuyện cười"), None);
}

#[test]
fn open_commands_resolve_against_the_scheme_table() {
	let Some(OpenCommand::App { name }) = apps::parse_open_command("Mở ứng dụng Google Maps") else {
		panic!("Expected an app command.");
	};

	assert_eq!(apps::lookup(&name).map(|entry| entry.name), Some("google_maps"));

	assert_eq!(apps::parse_open_command("mở"), Some(OpenCommand::MissingName));
}

#[test]
fn call_commands_resolve_numbers_services_and_names() {
	let Some(CallCommand::Number(number)) = calls::parse_call_command("gọi 0901 234-567") else {
		panic!("Expected a number call.");
	};
	let cleaned = calls::clean_phone_number(&number);

	assert_eq!(cleaned, "0901234567");
	assert!(calls::is_valid_phone_number(&cleaned));
	assert_eq!(
		calls::parse_call_command("call police"),
		Some(CallCommand::Emergency(EmergencyService::Police))
	);
	assert_eq!(
		calls::parse_call_command("liên hệ chị Hoa"),
		Some(CallCommand::Contact("chị hoa".to_string()))
	);
	assert_eq!(apps::parse_open_command("gọi mẹ"), None);
}

#[test]
fn remote_classes_are_first_match() {
	assert_eq!(intent::classify("Ghi chú thời tiết ngày mai"), RemoteIntent::Weather);
	assert_eq!(intent::classify("tạo ghi chú mua sữa"), RemoteIntent::Note);
	assert_eq!(intent::classify("nhắc tôi uống thuốc"), RemoteIntent::Task);
	assert_eq!(intent::classify("đặt lịch khám răng"), RemoteIntent::Appointment);
	assert_eq!(intent::classify("weather in Hanoi"), RemoteIntent::Chat);
}

#[test]
fn music_trigger_is_independent_of_open_parsing() {
	assert!(music::is_music_request("Mở nhạc Sơn Tùng"));
	assert!(!music::is_music_request("mở zalo"));
}

#[test]
fn reminder_turn_wording() {
	let now = datetime!(2026-10-18 09:00 UTC);
	let parsed = time_expr::parse_time("nhắc tôi họp lúc 15:00 ngày mai", now);

	assert!(parsed.is_valid());
	assert_eq!(parsed.time_label(), "15:00");
	assert_eq!(parsed.date_label(), "2026-10-19");
	assert!(notes::is_note_worthy(&parsed.original_text, Some("chat"), parsed.is_valid()));
	assert!(notes::confirms_reminder("Đã tạo nhắc nhở cho bạn"));
}
