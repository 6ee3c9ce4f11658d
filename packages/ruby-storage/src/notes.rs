use sqlx::SqliteExecutor;
use time::Date;

use ruby_domain::time_expr;

use crate::{
	Error, Result,
	models::{self, NewNote, Note},
};

const NOTE_COLUMNS: &str =
	"id, title, content, reminder_time, reminder_date, is_completed, created_at";

pub async fn insert_note<'e, E>(executor: E, note: &NewNote) -> Result<i64>
where
	E: SqliteExecutor<'e>,
{
	validate_new_note(note)?;

	let result = sqlx::query(
		"\
INSERT INTO notes (title, content, reminder_time, reminder_date, is_completed, created_at)
VALUES (?, ?, ?, ?, 0, ?)",
	)
	.bind(note.title.trim())
	.bind(note.content.trim())
	.bind(note.reminder_time.as_deref())
	.bind(note.reminder_date.as_deref())
	.bind(models::storage_timestamp(note.created_at))
	.execute(executor)
	.await?;

	Ok(result.last_insert_rowid())
}

/// Newest first.
pub async fn list_notes<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<Note>>
where
	E: SqliteExecutor<'e>,
{
	let sql = format!(
		"SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
	);
	let rows = sqlx::query_as::<_, Note>(&sql).bind(limit).bind(offset).fetch_all(executor).await?;

	Ok(rows)
}

pub async fn get_note<'e, E>(executor: E, id: i64) -> Result<Option<Note>>
where
	E: SqliteExecutor<'e>,
{
	let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?");
	let row = sqlx::query_as::<_, Note>(&sql).bind(id).fetch_optional(executor).await?;

	Ok(row)
}

pub async fn delete_note<'e, E>(executor: E, id: i64) -> Result<()>
where
	E: SqliteExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM notes WHERE id = ?").bind(id).execute(executor).await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("Note {id} does not exist.")));
	}

	Ok(())
}

/// Returns the number of deleted rows.
pub async fn delete_all_notes<'e, E>(executor: E) -> Result<u64>
where
	E: SqliteExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM notes").execute(executor).await?;

	Ok(result.rows_affected())
}

pub async fn count_notes<'e, E>(executor: E) -> Result<i64>
where
	E: SqliteExecutor<'e>,
{
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM notes").fetch_one(executor).await?;

	Ok(count)
}

pub async fn mark_note_completed<'e, E>(executor: E, id: i64) -> Result<()>
where
	E: SqliteExecutor<'e>,
{
	let result = sqlx::query("UPDATE notes SET is_completed = 1 WHERE id = ?")
		.bind(id)
		.execute(executor)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("Note {id} does not exist.")));
	}

	Ok(())
}

/// Open notes with a reminder time on `date`, or with a time but no date, earliest first.
pub async fn upcoming_reminders<'e, E>(executor: E, date: Date) -> Result<Vec<Note>>
where
	E: SqliteExecutor<'e>,
{
	let sql = format!(
		"\
SELECT {NOTE_COLUMNS}
FROM notes
WHERE (reminder_date = ? OR reminder_date IS NULL)
	AND reminder_time IS NOT NULL
	AND is_completed = 0
ORDER BY reminder_time ASC, id ASC"
	);
	let rows = sqlx::query_as::<_, Note>(&sql)
		.bind(time_expr::format_date(date))
		.fetch_all(executor)
		.await?;

	Ok(rows)
}

fn validate_new_note(note: &NewNote) -> Result<()> {
	if note.title.trim().is_empty() {
		return Err(Error::InvalidArgument("Note title must be non-empty.".to_string()));
	}
	if note.content.trim().is_empty() {
		return Err(Error::InvalidArgument("Note content must be non-empty.".to_string()));
	}
	if let Some(reminder_time) = note.reminder_time.as_deref()
		&& time_expr::parse_time_label(reminder_time).is_none()
	{
		return Err(Error::InvalidArgument(format!(
			"Reminder time must be HH:MM within 00:00-23:59, got {reminder_time:?}."
		)));
	}
	if let Some(reminder_date) = note.reminder_date.as_deref()
		&& time_expr::parse_date_label(reminder_date).is_none()
	{
		return Err(Error::InvalidArgument(format!(
			"Reminder date must be YYYY-MM-DD, got {reminder_date:?}."
		)));
	}

	Ok(())
}
