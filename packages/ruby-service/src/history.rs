use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use ruby_storage::{chat, models::ChatHistoryItem};

use crate::{Error, Result, RubyService, notes::resolve_page};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryRequest {
	pub limit: Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
	pub id: i64,
	pub sender: String,
	pub message: String,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}
impl From<ChatHistoryItem> for HistoryItem {
	fn from(item: ChatHistoryItem) -> Self {
		Self { id: item.id, sender: item.sender, message: item.message, timestamp: item.timestamp }
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
	pub items: Vec<HistoryItem>,
	pub total: i64,
}

impl RubyService {
	/// Newest messages first.
	pub async fn list_history(&self, req: HistoryRequest) -> Result<HistoryResponse> {
		let (limit, offset) = resolve_page(req.limit, req.offset)?;
		let items = chat::list_history(&self.db.pool, limit, offset).await?;
		let total = chat::count_history(&self.db.pool).await?;

		Ok(HistoryResponse { items: items.into_iter().map(HistoryItem::from).collect(), total })
	}

	pub async fn history_between(
		&self,
		start: OffsetDateTime,
		end: OffsetDateTime,
	) -> Result<HistoryResponse> {
		if start > end {
			return Err(Error::InvalidRequest {
				message: "start must not be after end.".to_string(),
			});
		}

		let items = chat::list_history_between(&self.db.pool, start, end).await?;
		let total = items.len() as i64;

		Ok(HistoryResponse { items: items.into_iter().map(HistoryItem::from).collect(), total })
	}

	pub async fn delete_history(&self) -> Result<u64> {
		let deleted = chat::delete_all_history(&self.db.pool).await?;

		tracing::info!(deleted, "Chat history cleared.");

		Ok(deleted)
	}
}
