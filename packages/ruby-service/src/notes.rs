use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use ruby_domain::notes as note_text;
use ruby_storage::{models::Note, notes};

use crate::{Error, Result, RubyService};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesRequest {
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteItem {
	pub id: i64,
	pub title: String,
	pub content: String,
	pub reminder_time: Option<String>,
	pub reminder_date: Option<String>,
	/// Display label such as `⏰ 15:00 (Ngày mai)`; empty without a reminder.
	pub reminder_label: String,
	pub is_completed: bool,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesResponse {
	pub items: Vec<NoteItem>,
	pub total: i64,
}

impl RubyService {
	pub async fn list_notes(&self, req: NotesRequest) -> Result<NotesResponse> {
		let (limit, offset) = resolve_page(req.limit, req.offset)?;
		let notes = notes::list_notes(&self.db.pool, limit, offset).await?;
		let total = notes::count_notes(&self.db.pool).await?;

		Ok(NotesResponse { items: self.note_items(notes), total })
	}

	pub async fn delete_note(&self, id: i64) -> Result<()> {
		notes::delete_note(&self.db.pool, id).await?;

		tracing::info!(id, "Note deleted.");

		Ok(())
	}

	pub async fn delete_all_notes(&self) -> Result<u64> {
		let deleted = notes::delete_all_notes(&self.db.pool).await?;

		tracing::info!(deleted, "Notes cleared.");

		Ok(deleted)
	}

	pub async fn complete_note(&self, id: i64) -> Result<NoteItem> {
		let mut tx = self.db.pool.begin().await.map_err(ruby_storage::Error::from)?;

		notes::mark_note_completed(&mut *tx, id).await?;

		let note = notes::get_note(&mut *tx, id)
			.await?
			.ok_or_else(|| Error::NotFound { message: format!("Note {id} does not exist.") })?;

		tx.commit().await.map_err(ruby_storage::Error::from)?;

		let today = self.now().date();

		Ok(note_item(note, today))
	}

	/// Open reminders for `date` (today when omitted), earliest first.
	pub async fn upcoming_reminders(&self, date: Option<Date>) -> Result<NotesResponse> {
		let date = date.unwrap_or_else(|| self.now().date());
		let notes = notes::upcoming_reminders(&self.db.pool, date).await?;
		let total = notes.len() as i64;

		Ok(NotesResponse { items: self.note_items(notes), total })
	}

	fn note_items(&self, notes: Vec<Note>) -> Vec<NoteItem> {
		let today = self.now().date();

		notes.into_iter().map(|note| note_item(note, today)).collect()
	}
}

/// Validated `(limit, offset)`. Missing values use the defaults.
pub(crate) fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64)> {
	let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
	let offset = offset.unwrap_or(0);

	if !(1..=MAX_PAGE_SIZE).contains(&limit) {
		return Err(Error::InvalidRequest {
			message: format!("limit must be between 1 and {MAX_PAGE_SIZE}."),
		});
	}
	if offset < 0 {
		return Err(Error::InvalidRequest { message: "offset must not be negative.".to_string() });
	}

	Ok((limit, offset))
}

fn note_item(note: Note, today: Date) -> NoteItem {
	let reminder_label =
		note_text::reminder_label(note.reminder_time.as_deref(), note.reminder_date.as_deref(), today);

	NoteItem {
		id: note.id,
		title: note.title,
		content: note.content,
		reminder_time: note.reminder_time,
		reminder_date: note.reminder_date,
		reminder_label,
		is_completed: note.is_completed,
		created_at: note.created_at,
	}
}
