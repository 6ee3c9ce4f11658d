use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// NFC-normalized, lowercased copy of `input`. Speech engines may emit decomposed diacritics, so
/// every matcher works on this form.
pub fn normalize(input: &str) -> String {
	input.nfc().collect::<String>().to_lowercase()
}

/// [`normalize`] plus the folds device commands rely on: `wi-fi`/`wi fi` become `wifi` and runs of
/// whitespace collapse to one space.
pub fn normalize_command(input: &str) -> String {
	let normalized = normalize(input);
	let folded = Regex::new(r"wi[\s-]?fi")
		.map(|re| re.replace_all(&normalized, "wifi").into_owned())
		.unwrap_or(normalized);

	folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn is_match(pattern: &str, text: &str) -> bool {
	Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}

pub(crate) fn captures<'t>(pattern: &str, text: &'t str) -> Option<Captures<'t>> {
	Regex::new(pattern).ok()?.captures(text)
}

pub(crate) fn contains_any(text: &str, needles: &[&str]) -> bool {
	needles.iter().any(|needle| text.contains(needle))
}
