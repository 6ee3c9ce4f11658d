use sqlx::SqliteExecutor;
use time::OffsetDateTime;

use crate::{
	Result,
	models::{self, ChatHistoryItem, Sender},
};

pub async fn insert_message<'e, E>(
	executor: E,
	sender: Sender,
	message: &str,
	timestamp: OffsetDateTime,
) -> Result<i64>
where
	E: SqliteExecutor<'e>,
{
	let result =
		sqlx::query("INSERT INTO chat_history (sender, message, timestamp) VALUES (?, ?, ?)")
			.bind(sender.as_str())
			.bind(message)
			.bind(models::storage_timestamp(timestamp))
			.execute(executor)
			.await?;

	Ok(result.last_insert_rowid())
}

/// Newest first.
pub async fn list_history<'e, E>(
	executor: E,
	limit: i64,
	offset: i64,
) -> Result<Vec<ChatHistoryItem>>
where
	E: SqliteExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ChatHistoryItem>(
		"\
SELECT id, sender, message, timestamp
FROM chat_history
ORDER BY timestamp DESC, id DESC
LIMIT ? OFFSET ?",
	)
	.bind(limit)
	.bind(offset)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Messages with `start <= timestamp <= end`, newest first.
pub async fn list_history_between<'e, E>(
	executor: E,
	start: OffsetDateTime,
	end: OffsetDateTime,
) -> Result<Vec<ChatHistoryItem>>
where
	E: SqliteExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ChatHistoryItem>(
		"\
SELECT id, sender, message, timestamp
FROM chat_history
WHERE timestamp BETWEEN ? AND ?
ORDER BY timestamp DESC, id DESC",
	)
	.bind(models::storage_timestamp(start))
	.bind(models::storage_timestamp(end))
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn count_history<'e, E>(executor: E) -> Result<i64>
where
	E: SqliteExecutor<'e>,
{
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM chat_history").fetch_one(executor).await?;

	Ok(count)
}

/// Returns the number of deleted rows.
pub async fn delete_all_history<'e, E>(executor: E) -> Result<u64>
where
	E: SqliteExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM chat_history").execute(executor).await?;

	Ok(result.rows_affected())
}
