pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_chat_history.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_chat_history.sql")),
				"tables/002_notes.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_notes.sql")),
				"tables/003_settings.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_settings.sql")),
				_ => {
					out.push_str(line);
				},
			}

			out.push('\n');

			continue;
		}

		out.push_str(line);
		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn includes_are_expanded() {
		let sql = render_schema();

		assert!(sql.contains("CREATE TABLE IF NOT EXISTS chat_history"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS notes"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS settings"));
		assert!(!sql.contains("\\ir "));
	}
}
