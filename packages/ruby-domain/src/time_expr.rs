//! Extraction of a clock time and calendar date from free-form Vietnamese text.
//!
//! Time families are tried in a fixed order and the first family that yields an in-range value
//! wins. There is no best-match selection, so `"10:30 pm"` resolves through the colon family to
//! `10:30`. The date is scanned independently of the time.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
	pub time: Option<Time>,
	pub date: Date,
	pub original_text: String,
}
impl ParsedTime {
	pub fn is_valid(&self) -> bool {
		self.time.is_some()
	}

	/// `HH:MM`, or an empty string when no time was recognized.
	pub fn time_label(&self) -> String {
		self.time.map(format_time).unwrap_or_default()
	}

	/// `YYYY-MM-DD`.
	pub fn date_label(&self) -> String {
		format_date(self.date)
	}

	/// The moment this expression names, interpreted at `offset`. `None` when no time was found.
	pub fn at(&self, offset: UtcOffset) -> Option<OffsetDateTime> {
		self.time.map(|time| PrimitiveDateTime::new(self.date, time).assume_offset(offset))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
	Plain,
	Trailing,
}

struct TimeFamily {
	pattern: &'static str,
	meridiem: Meridiem,
}

const TIME_FAMILIES: [TimeFamily; 4] = [
	// 11h55, 9h
	TimeFamily { pattern: r"([0-9]{1,2})h([0-9]{1,2})?", meridiem: Meridiem::Plain },
	// 14:00
	TimeFamily { pattern: r"([0-9]{1,2}):([0-9]{2})", meridiem: Meridiem::Plain },
	// 9 giờ 15 phút, 9 giờ
	TimeFamily {
		pattern: r"([0-9]{1,2})\s*giờ(?:\s*([0-9]{1,2})(?:\s*phút)?)?",
		meridiem: Meridiem::Plain,
	},
	// 9pm, 9:30 am
	TimeFamily {
		pattern: r"([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)\b",
		meridiem: Meridiem::Trailing,
	},
];

pub fn parse_time(message: &str, now: OffsetDateTime) -> ParsedTime {
	let normalized = text::normalize(message);
	let today = now.date();

	ParsedTime {
		time: parse_clock(&normalized),
		date: parse_date(&normalized, today),
		original_text: message.to_string(),
	}
}

pub fn format_time(time: Time) -> String {
	format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn format_date(date: Date) -> String {
	format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// `DD/MM/YYYY`, the form used in spoken replies.
pub fn format_date_vi(date: Date) -> String {
	format!("{:02}/{:02}/{:04}", date.day(), u8::from(date.month()), date.year())
}

/// Parses a stored `HH:MM` label. Anything else, including out-of-range values, is `None`.
pub fn parse_time_label(label: &str) -> Option<Time> {
	let (hour, minute) = label.split_once(':')?;

	if hour.len() != 2 || minute.len() != 2 {
		return None;
	}

	let hour: u8 = hour.parse().ok()?;
	let minute: u8 = minute.parse().ok()?;

	Time::from_hms(hour, minute, 0).ok()
}

/// Parses a stored `YYYY-MM-DD` label.
pub fn parse_date_label(label: &str) -> Option<Date> {
	let mut parts = label.split('-');
	let year: i32 = parts.next()?.parse().ok()?;
	let month: u8 = parts.next()?.parse().ok()?;
	let day: u8 = parts.next()?.parse().ok()?;

	if parts.next().is_some() {
		return None;
	}

	Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

fn parse_clock(normalized: &str) -> Option<Time> {
	TIME_FAMILIES.iter().find_map(|family| match_family(family, normalized))
}

fn match_family(family: &TimeFamily, normalized: &str) -> Option<Time> {
	let caps = text::captures(family.pattern, normalized)?;
	let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
	let minute: u32 = match caps.get(2) {
		Some(value) => value.as_str().parse().ok()?,
		None => 0,
	};

	if family.meridiem == Meridiem::Trailing {
		if !(1..=12).contains(&hour) {
			return None;
		}

		match caps.get(3).map(|value| value.as_str()) {
			Some("pm") if hour != 12 => hour += 12,
			Some("am") if hour == 12 => hour = 0,
			_ => {},
		}
	}

	if hour > 23 || minute > 59 {
		return None;
	}

	Time::from_hms(hour as u8, minute as u8, 0).ok()
}

fn parse_date(normalized: &str, today: Date) -> Date {
	if text::is_match(r"\b(?:ngày\s+)?mai\b", normalized) {
		return today.next_day().unwrap_or(today);
	}
	if normalized.contains("hôm nay") {
		return today;
	}

	explicit_date(normalized, today).unwrap_or(today)
}

fn explicit_date(normalized: &str, today: Date) -> Option<Date> {
	let caps = text::captures(r"\b([0-9]{1,2})[/-]([0-9]{1,2})(?:[/-]([0-9]{4}))?\b", normalized)?;
	let day: u8 = caps.get(1)?.as_str().parse().ok()?;
	let month: u8 = caps.get(2)?.as_str().parse().ok()?;
	let year: i32 = match caps.get(3) {
		Some(value) => value.as_str().parse().ok()?,
		None => today.year(),
	};

	Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}
