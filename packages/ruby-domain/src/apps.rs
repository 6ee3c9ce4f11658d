//! App launching: the scheme table and parsing of `mở …` commands.

use ruby_config::Platform;

use crate::text;

const POLITE_SUFFIXES: [&str; 11] = [
	"giúp tôi", "dùm tôi", "giùm tôi", "giúp mình", "giúp", "dùm", "giùm", "với", "nhé", "nha", "đi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppScheme {
	pub name: &'static str,
	pub android: &'static str,
	pub ios: &'static str,
	pub fallback: Option<&'static str>,
}
impl AppScheme {
	pub fn scheme(&self, platform: Platform) -> &'static str {
		match platform {
			Platform::Android => self.android,
			Platform::Ios => self.ios,
		}
	}
}

const fn app(
	name: &'static str,
	android: &'static str,
	ios: &'static str,
	fallback: Option<&'static str>,
) -> AppScheme {
	AppScheme { name, android, ios, fallback }
}

pub const APP_SCHEMES: [AppScheme; 24] = [
	app("youtube", "vnd.youtube://", "youtube://", Some("https://www.youtube.com")),
	app("facebook", "fb://", "fb://", Some("https://www.facebook.com")),
	app("messenger", "fb-messenger://", "fb-messenger://", Some("https://www.messenger.com")),
	app(
		"instagram",
		"instagram://user?username=",
		"instagram://user?username=",
		Some("https://www.instagram.com"),
	),
	app("zalo", "zalo://", "zalo://", Some("https://zalo.me")),
	app("gmail", "googlegmail://", "googlegmail://", Some("https://mail.google.com")),
	app("chrome", "googlechrome://", "googlechrome://", Some("https://www.google.com/chrome/")),
	app("google", "google://", "google://", Some("https://www.google.com")),
	app("google_maps", "geo:0,0?q=", "comgooglemaps://?q=", Some("https://maps.google.com")),
	app("spotify", "spotify://", "spotify://", Some("https://open.spotify.com")),
	app("tiktok", "snssdk1233://", "snssdk1233://", Some("https://www.tiktok.com")),
	app("whatsapp", "whatsapp://send?text=", "whatsapp://send?text=", Some("https://www.whatsapp.com")),
	app("telegram", "tg://resolve?domain=", "tg://resolve?domain=", Some("https://t.me")),
	app("shopee", "shopeeid://", "shopeeid://", Some("https://shopee.vn")),
	app("lazada", "lazada://", "lazada://", Some("https://www.lazada.vn")),
	app("grab", "grab://", "grab://", Some("https://www.grab.com")),
	app("viber", "viber://", "viber://", Some("https://www.viber.com")),
	app("skype", "skype:", "skype:", Some("https://www.skype.com")),
	app("zalo_pay", "zalopay://", "zalopay://", Some("https://zalopay.vn")),
	app("settings", "android.settings.SETTINGS", "App-Prefs://", None),
	app("phone", "tel:", "tel:", None),
	app("sms", "sms:", "sms:", None),
	app("calendar", "content://com.android.calendar/time/", "calshow:", None),
	app("mail", "mailto:", "mailto:", None),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenCommand {
	/// `mở [ứng dụng] <name>`. `name` is lowercased with the politeness word removed.
	App { name: String },
	/// `mở` or `mở ứng dụng` with nothing after it.
	MissingName,
}

/// Case-insensitive table lookup. Spaces in `name` map to `_`, so `Google Maps` finds
/// `google_maps`.
pub fn lookup(name: &str) -> Option<&'static AppScheme> {
	let key = text::normalize(name.trim()).split_whitespace().collect::<Vec<_>>().join("_");

	APP_SCHEMES.iter().find(|entry| entry.name == key)
}

pub fn parse_open_command(input: &str) -> Option<OpenCommand> {
	let normalized = text::normalize(input.trim());

	if normalized == "mở" || normalized == "mở ứng dụng" {
		return Some(OpenCommand::MissingName);
	}

	let rest = normalized.strip_prefix("mở ")?;
	let rest = rest.strip_prefix("ứng dụng ").unwrap_or(rest).trim();
	let name = strip_polite_suffix(rest);

	if name.is_empty() {
		return Some(OpenCommand::MissingName);
	}

	Some(OpenCommand::App { name: name.to_string() })
}

pub fn opened_reply(app_name: &str) -> String {
	format!("Đã mở ứng dụng {app_name} cho bạn.")
}

pub fn missing_name_reply() -> String {
	"Vui lòng nói tên ứng dụng bạn muốn mở".to_string()
}

pub fn unsupported_app_alert(app_name: &str) -> (String, String) {
	(
		"Ứng dụng không được hỗ trợ".to_string(),
		format!("Ứng dụng \"{app_name}\" chưa được hỗ trợ mở tự động."),
	)
}

pub fn open_failed_alert(target: &str, reason: &str) -> (String, String) {
	("Lỗi mở ứng dụng".to_string(), format!("Không thể mở \"{target}\": {reason}"))
}

pub(crate) fn strip_polite_suffix(name: &str) -> &str {
	for suffix in POLITE_SUFFIXES {
		if let Some(head) = name.strip_suffix(suffix)
			&& (head.is_empty() || head.ends_with(char::is_whitespace))
		{
			return head.trim_end();
		}
	}

	name
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_is_case_insensitive_and_maps_spaces() {
		assert_eq!(lookup("YouTube").map(|entry| entry.name), Some("youtube"));
		assert_eq!(lookup("google maps").map(|entry| entry.name), Some("google_maps"));
		assert!(lookup("xyz").is_none());
	}

	#[test]
	fn scheme_follows_platform() {
		let maps = lookup("google_maps").expect("google_maps must be in the table.");

		assert_eq!(maps.scheme(Platform::Android), "geo:0,0?q=");
		assert_eq!(maps.scheme(Platform::Ios), "comgooglemaps://?q=");
	}

	#[test]
	fn open_strips_prefix_and_politeness() {
		assert_eq!(
			parse_open_command("Mở ứng dụng YouTube giúp tôi"),
			Some(OpenCommand::App { name: "youtube".to_string() })
		);
		assert_eq!(
			parse_open_command("mở zalo nhé"),
			Some(OpenCommand::App { name: "zalo".to_string() })
		);
		assert_eq!(
			parse_open_command("mở google maps"),
			Some(OpenCommand::App { name: "google maps".to_string() })
		);
	}

	#[test]
	fn politeness_word_must_be_a_whole_word() {
		assert_eq!(
			parse_open_command("mở manha"),
			Some(OpenCommand::App { name: "manha".to_string() })
		);
	}

	#[test]
	fn unknown_names_still_parse() {
		assert_eq!(parse_open_command("mở xyz"), Some(OpenCommand::App { name: "xyz".to_string() }));
	}

	#[test]
	fn bare_open_asks_for_a_name() {
		assert_eq!(parse_open_command("mở"), Some(OpenCommand::MissingName));
		assert_eq!(parse_open_command(" Mở ứng dụng "), Some(OpenCommand::MissingName));
		assert_eq!(parse_open_command("mở nhé"), Some(OpenCommand::MissingName));
	}

	#[test]
	fn call_commands_are_not_open_commands() {
		assert_eq!(parse_open_command("gọi 0906 123-456"), None);
		assert_eq!(parse_open_command("gọi mẹ"), None);
	}

	#[test]
	fn other_text_is_not_an_open_command() {
		assert_eq!(parse_open_command("thời tiết hôm nay"), None);
		assert_eq!(parse_open_command("mởi"), None);
	}
}
