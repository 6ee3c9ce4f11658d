//! Phone calls: parsing `gọi …` commands, emergency numbers, contact lookup, and call wording.

use crate::{apps, text};

const CALL_PATTERN: &str =
	r"^(?:gọi điện thoại cho|gọi điện cho|gọi cho|gọi|call|phone|điện thoại|liên hệ)\s+(.+)$";
const NUMBER_PATTERN: &str = r"^(\+?[0-9][0-9\s\-]*)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyService {
	Ambulance,
	Police,
	Fire,
}
impl EmergencyService {
	pub fn number(self) -> &'static str {
		match self {
			Self::Ambulance => "115",
			Self::Police => "113",
			Self::Fire => "114",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Ambulance => "cấp cứu",
			Self::Police => "cảnh sát",
			Self::Fire => "cứu hỏa",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallCommand {
	Emergency(EmergencyService),
	/// The raw digits run as spoken, not yet cleaned.
	Number(String),
	/// Contact name, lowercased with the politeness word removed.
	Contact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
	pub name: String,
	pub phone_numbers: Vec<String>,
}

/// A resolved call, ready for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
	Number(String),
	Contact { name: String, number: String },
	Emergency(EmergencyService),
}
impl CallTarget {
	pub fn dial_number(&self) -> &str {
		match self {
			Self::Number(number) | Self::Contact { number, .. } => number,
			Self::Emergency(service) => service.number(),
		}
	}

	pub fn tel_url(&self) -> String {
		format!("tel:{}", self.dial_number())
	}

	/// Confirmation title and message.
	pub fn prompt(&self) -> (String, String) {
		match self {
			Self::Number(number) =>
				("Xác nhận gọi điện".to_string(), format!("Bạn có muốn gọi cho số {number}?")),
			Self::Contact { name, number } => (
				"Xác nhận gọi điện".to_string(),
				format!("Bạn có muốn gọi cho {name}?\nSố: {number}"),
			),
			Self::Emergency(service) => (
				"⚠️ Cuộc gọi khẩn cấp".to_string(),
				format!(
					"Bạn có chắc chắn muốn gọi {} ({})?",
					service.label(),
					service.number()
				),
			),
		}
	}

	pub fn calling_reply(&self) -> String {
		match self {
			Self::Number(number) => format!("📞 Đang gọi số {number}..."),
			Self::Contact { name, number } => format!("📞 Đang gọi cho {name} ({number})..."),
			Self::Emergency(service) =>
				format!("🚨 Đang gọi {} ({})...", service.label(), service.number()),
		}
	}

	pub fn cancelled_reply(&self) -> String {
		match self {
			Self::Emergency(_) => "❌ Đã hủy cuộc gọi khẩn cấp.".to_string(),
			_ => "❌ Đã hủy cuộc gọi.".to_string(),
		}
	}

	pub fn failed_reply(&self, reason: &str) -> String {
		match self {
			Self::Emergency(_) => format!("❌ Không thể gọi khẩn cấp: {reason}"),
			_ => format!("❌ Không thể thực hiện cuộc gọi: {reason}"),
		}
	}
}

/// Parses a message that starts with a call verb. Emergency services win over numbers and
/// contact names.
pub fn parse_call_command(input: &str) -> Option<CallCommand> {
	let normalized = text::normalize(input.trim());
	let caps = text::captures(CALL_PATTERN, &normalized)?;
	let target = caps.get(1)?.as_str().trim();

	if let Some(service) = match_emergency(target) {
		return Some(CallCommand::Emergency(service));
	}

	if let Some(number_caps) = text::captures(NUMBER_PATTERN, target)
		&& let Some(number) = number_caps.get(1)
	{
		return Some(CallCommand::Number(number.as_str().trim().to_string()));
	}

	let name = apps::strip_polite_suffix(target);

	if name.is_empty() {
		return None;
	}

	Some(CallCommand::Contact(name.to_string()))
}

/// Emergency service named by a call target. A bare short number must match exactly; otherwise
/// police is checked before fire, and ambulance is the catch-all for `cấp cứu`/`khẩn cấp`.
pub fn match_emergency(target: &str) -> Option<EmergencyService> {
	let normalized = text::normalize(target);

	match clean_phone_number(&normalized).as_str() {
		"113" => return Some(EmergencyService::Police),
		"114" => return Some(EmergencyService::Fire),
		"115" | "911" => return Some(EmergencyService::Ambulance),
		_ => {},
	}

	if text::is_match(r"cảnh sát|\bpolice\b", &normalized) {
		Some(EmergencyService::Police)
	} else if text::is_match(r"cứu hỏa|cứu hoả|\bfire\b", &normalized) {
		Some(EmergencyService::Fire)
	} else if text::is_match(r"cấp cứu|khẩn cấp|\bemergency\b", &normalized) {
		Some(EmergencyService::Ambulance)
	} else {
		None
	}
}

/// Finds the contact for `query`: an exact name first, then a name containing the query, then a
/// name sharing a whole word with it. Contacts without a phone number never match.
pub fn find_contact<'a>(contacts: &'a [Contact], query: &str) -> Option<&'a Contact> {
	let query = text::normalize(query.trim());

	if query.is_empty() {
		return None;
	}

	let callable = || contacts.iter().filter(|contact| !contact.phone_numbers.is_empty());
	let words = query.split_whitespace().collect::<Vec<_>>();

	callable()
		.find(|contact| text::normalize(&contact.name) == query)
		.or_else(|| callable().find(|contact| text::normalize(&contact.name).contains(&query)))
		.or_else(|| {
			callable().find(|contact| {
				text::normalize(&contact.name).split_whitespace().any(|part| words.contains(&part))
			})
		})
}

/// Removes spaces and dashes.
pub fn clean_phone_number(raw: &str) -> String {
	raw.chars().filter(|ch| !ch.is_whitespace() && *ch != '-').collect()
}

/// 7 to 15 digits after dropping spaces, dashes, and `+`.
pub fn is_valid_phone_number(number: &str) -> bool {
	let digits: String = number.chars().filter(|ch| !matches!(ch, ' ' | '-' | '+')).collect();

	!digits.is_empty()
		&& digits.chars().all(|ch| ch.is_ascii_digit())
		&& (7..=15).contains(&digits.len())
}

pub fn invalid_phone_reply(number: &str) -> String {
	format!("❌ Số điện thoại \"{number}\" không hợp lệ.")
}

pub fn contact_not_found_reply(name: &str) -> String {
	format!("❌ Không tìm thấy liên hệ \"{name}\" trong danh bạ.")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contact(name: &str, phone: &str) -> Contact {
		Contact { name: name.to_string(), phone_numbers: vec![phone.to_string()] }
	}

	#[test]
	fn numbers_are_extracted_after_the_verb() {
		assert_eq!(
			parse_call_command("gọi 0906 123-456"),
			Some(CallCommand::Number("0906 123-456".to_string()))
		);
		assert_eq!(
			parse_call_command("Gọi cho +84906123456"),
			Some(CallCommand::Number("+84906123456".to_string()))
		);
	}

	#[test]
	fn names_drop_the_politeness_word() {
		assert_eq!(parse_call_command("gọi cho mẹ nhé"), Some(CallCommand::Contact("mẹ".to_string())));
		assert_eq!(
			parse_call_command("gọi điện cho anh Nam"),
			Some(CallCommand::Contact("anh nam".to_string()))
		);
		assert_eq!(parse_call_command("call Lan"), Some(CallCommand::Contact("lan".to_string())));
	}

	#[test]
	fn emergency_words_and_numbers() {
		assert_eq!(
			parse_call_command("gọi 113"),
			Some(CallCommand::Emergency(EmergencyService::Police))
		);
		assert_eq!(
			parse_call_command("gọi cấp cứu"),
			Some(CallCommand::Emergency(EmergencyService::Ambulance))
		);
		assert_eq!(
			parse_call_command("call 911"),
			Some(CallCommand::Emergency(EmergencyService::Ambulance))
		);
		assert_eq!(
			parse_call_command("gọi cứu hỏa"),
			Some(CallCommand::Emergency(EmergencyService::Fire))
		);
		assert_eq!(
			parse_call_command("gọi khẩn cấp cho cảnh sát"),
			Some(CallCommand::Emergency(EmergencyService::Police))
		);
	}

	#[test]
	fn emergency_digits_inside_a_longer_number_do_not_count() {
		assert_eq!(
			parse_call_command("gọi 0906 113 222"),
			Some(CallCommand::Number("0906 113 222".to_string()))
		);
		assert_eq!(
			parse_call_command("call firefox support"),
			Some(CallCommand::Contact("firefox support".to_string()))
		);
	}

	#[test]
	fn only_leading_verbs_start_a_call() {
		assert_eq!(parse_call_command("nhắc tôi gọi mẹ lúc 8h"), None);
		assert_eq!(parse_call_command("gọi"), None);
		assert_eq!(parse_call_command("gọi nhé"), None);
	}

	#[test]
	fn contact_lookup_order() {
		let contacts = vec![
			contact("Nam Nguyễn", "0901000001"),
			contact("Mẹ", "0901000002"),
			contact("Mẹ Hiền", "0901000003"),
			Contact { name: "Lan".to_string(), phone_numbers: Vec::new() },
		];

		assert_eq!(find_contact(&contacts, "mẹ").map(|c| c.name.as_str()), Some("Mẹ"));
		assert_eq!(find_contact(&contacts, "hiền").map(|c| c.name.as_str()), Some("Mẹ Hiền"));
		assert_eq!(find_contact(&contacts, "anh nam").map(|c| c.name.as_str()), Some("Nam Nguyễn"));
		assert_eq!(find_contact(&contacts, "lan"), None);
		assert_eq!(find_contact(&contacts, "  "), None);
	}

	#[test]
	fn phone_validation() {
		assert_eq!(clean_phone_number("0906 123-456"), "0906123456");
		assert!(is_valid_phone_number("0906123456"));
		assert!(is_valid_phone_number("+84906123456"));
		assert!(!is_valid_phone_number("12345"));
		assert!(!is_valid_phone_number("1234567890123456"));
		assert!(!is_valid_phone_number("09a6123456"));
	}

	#[test]
	fn wording_follows_the_target() {
		let emergency = CallTarget::Emergency(EmergencyService::Police);

		assert_eq!(emergency.tel_url(), "tel:113");
		assert_eq!(emergency.calling_reply(), "🚨 Đang gọi cảnh sát (113)...");
		assert_eq!(emergency.cancelled_reply(), "❌ Đã hủy cuộc gọi khẩn cấp.");

		let mom = CallTarget::Contact { name: "Mẹ".to_string(), number: "0901000002".to_string() };

		assert_eq!(mom.prompt().1, "Bạn có muốn gọi cho Mẹ?\nSố: 0901000002");
		assert_eq!(mom.calling_reply(), "📞 Đang gọi cho Mẹ (0901000002)...");
	}
}
