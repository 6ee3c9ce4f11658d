use crate::text;

const TRIGGERS: [&str; 6] = ["mở nhạc", "phát nhạc", "bật nhạc", "bài hát", "nghe nhạc", "youtube"];
const KEYWORD_PATTERN: &str =
	r"(?:mở|phát|bật|nghe)\s+(?:bài hát|nhạc)?\s*(.+?)\s*(?:trên youtube|bằng youtube|youtube)?$";
// Order matters: only the first suffix that matches is removed.
const POLITE_SUFFIXES: [&str; 13] = [
	"dùm tôi", "giùm tôi", "giúp mình", "giúp tôi", "nhé", "với", "nha", "đi", "giùm", "dùm", "thôi",
	"mà", "hộ mình",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicRequest {
	pub keyword: String,
	pub url: String,
}
impl MusicRequest {
	pub fn reply(&self) -> String {
		format!("🎵 Đã mở YouTube với từ khoá \"{}\" cho bạn.", self.keyword)
	}
}

pub fn is_music_request(message: &str) -> bool {
	text::contains_any(&text::normalize(message), &TRIGGERS)
}

/// Keyword between the action verb and an optional YouTube suffix. Keywords shorter than two
/// characters become `default_keyword`. `None` when no action verb is present.
pub fn extract_keyword(message: &str, default_keyword: &str) -> Option<String> {
	let normalized = text::normalize(message);
	let caps = text::captures(KEYWORD_PATTERN, &normalized)?;
	let mut keyword = caps.get(1)?.as_str().trim();

	for suffix in POLITE_SUFFIXES {
		if let Some(head) = keyword.strip_suffix(suffix) {
			keyword = head.trim();

			break;
		}
	}

	if keyword.chars().count() >= 2 {
		Some(keyword.to_string())
	} else {
		Some(default_keyword.to_string())
	}
}

pub fn search_url(search_base: &str, keyword: &str) -> String {
	format!("{search_base}?search_query={}", urlencoding::encode(keyword))
}

/// Full music match: trigger check, keyword extraction, and the search URL to open.
pub fn match_music(message: &str, cfg: &ruby_config::Music) -> Option<MusicRequest> {
	if !is_music_request(message) {
		return None;
	}

	let keyword = extract_keyword(message, &cfg.default_keyword)?;
	let url = search_url(&cfg.search_url, &keyword);

	Some(MusicRequest { keyword, url })
}
