use sqlx::{
	SqlitePool,
	sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{Result, schema};

/// Columns added to `notes` after its first release. Older databases get them on startup.
const NOTE_COLUMN_UPGRADES: [(&str, &str); 3] = [
	("reminder_time", "ALTER TABLE notes ADD COLUMN reminder_time TEXT"),
	("reminder_date", "ALTER TABLE notes ADD COLUMN reminder_date TEXT"),
	("is_completed", "ALTER TABLE notes ADD COLUMN is_completed INTEGER NOT NULL DEFAULT 0"),
];

#[derive(Clone)]
pub struct Db {
	pub pool: SqlitePool,
}
impl Db {
	pub async fn connect(cfg: &ruby_config::Sqlite) -> Result<Self> {
		let options = SqliteConnectOptions::new().filename(&cfg.path).create_if_missing(true);
		let pool =
			SqlitePoolOptions::new().max_connections(cfg.pool_max_conns).connect_with(options).await?;

		Ok(Self { pool })
	}

	/// Creates missing tables and upgrades an older `notes` table in place. Safe to run on every
	/// startup.
	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let mut tx = self.pool.begin().await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('notes')")
			.fetch_all(&mut *tx)
			.await?;

		for (column, statement) in NOTE_COLUMN_UPGRADES {
			if columns.iter().any(|existing| existing == column) {
				continue;
			}

			sqlx::query(statement).execute(&mut *tx).await?;

			tracing::info!(column, "Added missing notes column.");
		}

		tx.commit().await?;

		Ok(())
	}
}
