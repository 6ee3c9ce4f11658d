//! Note and reminder wording.

use time::Date;

use crate::{text, time_expr};

pub const NOTE_TITLE: &str = "Ghi chú";
pub const REMINDER_NOTE_TITLE: &str = "Nhắc nhở";
pub const UNTITLED_NOTE: &str = "Ghi chú không có tiêu đề";
pub const NOTE_CREATED_TYPE: &str = "note_created";
pub const PROCESSED_REPLY: &str = "Đã xử lý yêu cầu của bạn.";

const NOTE_KEYWORDS: [&str; 4] = ["ghi chú", "note", "nhắc", "remind"];

/// Whether a remote turn should produce a note: the message names a note or reminder, the backend
/// reported a created note, or a clock time was recognized.
pub fn is_note_worthy(message: &str, reply_type: Option<&str>, has_valid_time: bool) -> bool {
	text::contains_any(&text::normalize(message), &NOTE_KEYWORDS)
		|| reply_type == Some(NOTE_CREATED_TYPE)
		|| has_valid_time
}

/// Note body for a turn: the lowercased message without `tạo ghi chú`, else the first single-quoted
/// phrase in the reply, else a placeholder.
pub fn extract_note_content(message: &str, reply: &str) -> String {
	let mut content = text::normalize(message);

	if content.contains("tạo ghi chú") {
		content = content.replacen("tạo ghi chú", "", 1).trim().to_string();
	}
	if content.is_empty()
		&& let Some(caps) = text::captures(r"'([^']+)'", reply)
		&& let Some(quoted) = caps.get(1)
	{
		content = quoted.as_str().to_string();
	}
	if content.is_empty() {
		return UNTITLED_NOTE.to_string();
	}

	content
}

/// Reply used when the backend answered with `content` but no `reply`.
pub fn note_created_reply(content: &str) -> String {
	format!("Đã tạo ghi chú \"{content}\" thành công!")
}

pub fn reminder_clause(time: &str, date: Date) -> String {
	format!("⏰ Tôi sẽ nhắc bạn lúc {time} ngày {}.", time_expr::format_date_vi(date))
}

pub fn passed_clause(time: &str, date: Date) -> String {
	format!(
		"⚠️ Thời điểm {time} ngày {} đã qua nên tôi không đặt nhắc nhở.",
		time_expr::format_date_vi(date)
	)
}

/// Appends `clause` to `reply` on its own line.
pub fn with_clause(reply: &str, clause: &str) -> String {
	if reply.is_empty() {
		return clause.to_string();
	}

	format!("{reply}\n{clause}")
}

/// `⏰ HH:MM`, plus `(Ngày mai)` or `(D/M/YYYY)` when the date is not today.
pub fn reminder_label(time: Option<&str>, date: Option<&str>, today: Date) -> String {
	let Some(time) = time.filter(|time| !time.is_empty()) else {
		return String::new();
	};
	let label = format!("⏰ {time}");
	let Some(date) = date.and_then(time_expr::parse_date_label) else {
		return label;
	};

	if date == today {
		return label;
	}

	let day = if Some(date) == today.next_day() {
		"Ngày mai".to_string()
	} else {
		format!("{}/{}/{}", date.day(), u8::from(date.month()), date.year())
	};

	format!("{label} ({day})")
}

/// `N giây|giay|second(s)` in the message, as a delay in seconds.
pub fn relative_delay_seconds(message: &str) -> Option<i64> {
	let normalized = text::normalize(message);
	let caps = text::captures(r"([0-9]+)\s*(giây|giay|seconds?)", &normalized)?;

	caps.get(1)?.as_str().parse().ok()
}

/// Whether the backend reply confirms it created a reminder.
pub fn confirms_reminder(reply: &str) -> bool {
	text::normalize(reply).contains("đã tạo nhắc")
}
