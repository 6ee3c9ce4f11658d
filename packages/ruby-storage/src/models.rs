use time::{OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
	User,
	Bot,
}
impl Sender {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Bot => "bot",
		}
	}
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatHistoryItem {
	pub id: i64,
	pub sender: String,
	pub message: String,
	pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Note {
	pub id: i64,
	pub title: String,
	pub content: String,
	/// `HH:MM`.
	pub reminder_time: Option<String>,
	/// `YYYY-MM-DD`.
	pub reminder_date: Option<String>,
	pub is_completed: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewNote {
	pub title: String,
	pub content: String,
	pub reminder_time: Option<String>,
	pub reminder_date: Option<String>,
	pub created_at: OffsetDateTime,
}

/// Timestamps are stored as whole-second UTC so their text form sorts chronologically.
pub(crate) fn storage_timestamp(ts: OffsetDateTime) -> OffsetDateTime {
	let utc = ts.to_offset(UtcOffset::UTC);

	utc.replace_nanosecond(0).unwrap_or(utc)
}
