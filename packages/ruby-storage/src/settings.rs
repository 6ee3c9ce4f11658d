use sqlx::SqliteExecutor;

use crate::Result;

/// User-editable chat backend base URL.
pub const API_URL_KEY: &str = "API_URL";

pub async fn get_setting<'e, E>(executor: E, key: &str) -> Result<Option<String>>
where
	E: SqliteExecutor<'e>,
{
	let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
		.bind(key)
		.fetch_optional(executor)
		.await?;

	Ok(value)
}

pub async fn set_setting<'e, E>(executor: E, key: &str, value: &str) -> Result<()>
where
	E: SqliteExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO settings (key, value)
VALUES (?, ?)
ON CONFLICT (key) DO UPDATE SET value = excluded.value",
	)
	.bind(key)
	.bind(value)
	.execute(executor)
	.await?;

	Ok(())
}
