use time::{
	Duration,
	macros::{date, datetime},
};

use ruby_storage::{
	Error, chat,
	db::Db,
	models::{NewNote, Sender},
	notes, settings,
};
use ruby_testkit::TestDatabase;

async fn open(test_db: &TestDatabase) -> Db {
	let db = Db::connect(&test_db.config()).await.expect("Failed to open SQLite database.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn new_note(content: &str, reminder_time: Option<&str>, reminder_date: Option<&str>) -> NewNote {
	NewNote {
		title: "Ghi chú".to_string(),
		content: content.to_string(),
		reminder_time: reminder_time.map(str::to_string),
		reminder_date: reminder_date.map(str::to_string),
		created_at: datetime!(2026-10-18 09:00 UTC),
	}
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
	let test_db = TestDatabase::new();
	let db = open(&test_db).await;

	db.ensure_schema().await.expect("Second ensure_schema must succeed.");

	let tables: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name IN ('chat_history', 'notes', 'settings')",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to count tables.");

	assert_eq!(tables, 3);

	db.pool.close().await;
	test_db.cleanup().expect("Failed to cleanup test database.");
}

#[tokio::test]
async fn legacy_notes_table_gains_missing_columns() {
	let test_db = TestDatabase::new();
	let db = Db::connect(&test_db.config()).await.expect("Failed to open SQLite database.");

	sqlx::query(
		"CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, content TEXT NOT NULL, created_at DATETIME DEFAULT CURRENT_TIMESTAMP)",
	)
	.execute(&db.pool)
	.await
	.expect("Failed to create legacy notes table.");
	sqlx::query("INSERT INTO notes (title, content) VALUES ('Ghi chú', 'cũ')")
		.execute(&db.pool)
		.await
		.expect("Failed to insert legacy note.");

	db.ensure_schema().await.expect("Failed to upgrade schema.");

	let legacy = notes::get_note(&db.pool, 1)
		.await
		.expect("Failed to read legacy note.")
		.expect("Legacy note must survive the upgrade.");

	assert_eq!(legacy.content, "cũ");
	assert!(legacy.reminder_time.is_none());
	assert!(!legacy.is_completed);

	db.pool.close().await;
}

#[tokio::test]
async fn chat_history_is_newest_first_with_paging_and_ranges() {
	let test_db = TestDatabase::new();
	let db = open(&test_db).await;
	let base = datetime!(2026-10-18 09:00 UTC);

	for (offset, (sender, text)) in
		[(Sender::User, "xin chào"), (Sender::Bot, "chào bạn"), (Sender::User, "mấy giờ rồi")]
			.into_iter()
			.enumerate()
	{
		chat::insert_message(&db.pool, sender, text, base + Duration::minutes(offset as i64))
			.await
			.expect("Failed to insert message.");
	}

	let page = chat::list_history(&db.pool, 2, 0).await.expect("Failed to list history.");

	assert_eq!(page.iter().map(|item| item.message.as_str()).collect::<Vec<_>>(), [
		"mấy giờ rồi",
		"chào bạn"
	]);
	assert_eq!(page[1].sender, "bot");

	let rest = chat::list_history(&db.pool, 2, 2).await.expect("Failed to list history.");

	assert_eq!(rest.len(), 1);
	assert_eq!(rest[0].message, "xin chào");
	assert_eq!(rest[0].timestamp, base);

	let window =
		chat::list_history_between(&db.pool, base + Duration::minutes(1), base + Duration::hours(1))
			.await
			.expect("Failed to list history range.");

	assert_eq!(window.len(), 2);
	assert_eq!(chat::count_history(&db.pool).await.expect("Failed to count history."), 3);
	assert_eq!(chat::delete_all_history(&db.pool).await.expect("Failed to delete history."), 3);
	assert_eq!(chat::count_history(&db.pool).await.expect("Failed to count history."), 0);

	db.pool.close().await;
}

#[tokio::test]
async fn notes_crud_and_reminders() {
	let test_db = TestDatabase::new();
	let db = open(&test_db).await;
	let today = date!(2026 - 10 - 18);
	let afternoon = notes::insert_note(
		&db.pool,
		&new_note("họp nhóm", Some("15:00"), Some("2026-10-18")),
	)
	.await
	.expect("Failed to insert note.");
	let morning = notes::insert_note(&db.pool, &new_note("uống thuốc", Some("08:30"), None))
		.await
		.expect("Failed to insert note.");
	let tomorrow = notes::insert_note(
		&db.pool,
		&new_note("đi chợ", Some("07:00"), Some("2026-10-19")),
	)
	.await
	.expect("Failed to insert note.");
	let plain =
		notes::insert_note(&db.pool, &new_note("mua sữa", None, None)).await.expect("Failed to insert note.");

	let upcoming =
		notes::upcoming_reminders(&db.pool, today).await.expect("Failed to list reminders.");

	assert_eq!(upcoming.iter().map(|note| note.id).collect::<Vec<_>>(), [morning, afternoon]);

	notes::mark_note_completed(&db.pool, morning).await.expect("Failed to complete note.");

	let upcoming =
		notes::upcoming_reminders(&db.pool, today).await.expect("Failed to list reminders.");

	assert_eq!(upcoming.iter().map(|note| note.id).collect::<Vec<_>>(), [afternoon]);

	let stored = notes::get_note(&db.pool, tomorrow)
		.await
		.expect("Failed to read note.")
		.expect("Note must exist.");

	assert_eq!(stored.reminder_time.as_deref(), Some("07:00"));
	assert_eq!(stored.reminder_date.as_deref(), Some("2026-10-19"));

	notes::delete_note(&db.pool, plain).await.expect("Failed to delete note.");

	assert!(matches!(notes::delete_note(&db.pool, plain).await, Err(Error::NotFound(_))));
	assert!(matches!(notes::mark_note_completed(&db.pool, 9_999).await, Err(Error::NotFound(_))));
	assert_eq!(notes::count_notes(&db.pool).await.expect("Failed to count notes."), 3);
	assert_eq!(notes::list_notes(&db.pool, 10, 0).await.expect("Failed to list notes.").len(), 3);
	assert_eq!(notes::delete_all_notes(&db.pool).await.expect("Failed to delete notes."), 3);

	db.pool.close().await;
}

#[tokio::test]
async fn malformed_notes_are_rejected_before_writing() {
	let test_db = TestDatabase::new();
	let db = open(&test_db).await;
	let result = notes::insert_note(&db.pool, &new_note("họp", Some("7:5"), None)).await;

	assert!(matches!(result, Err(Error::InvalidArgument(_))));

	let result = notes::insert_note(&db.pool, &new_note("", None, None)).await;

	assert!(matches!(result, Err(Error::InvalidArgument(_))));
	assert_eq!(notes::count_notes(&db.pool).await.expect("Failed to count notes."), 0);

	db.pool.close().await;
}

#[tokio::test]
async fn settings_upsert() {
	let test_db = TestDatabase::new();
	let db = open(&test_db).await;

	assert_eq!(
		settings::get_setting(&db.pool, settings::API_URL_KEY).await.expect("Failed to read."),
		None
	);

	settings::set_setting(&db.pool, settings::API_URL_KEY, "http://10.0.0.2:5000")
		.await
		.expect("Failed to write setting.");
	settings::set_setting(&db.pool, settings::API_URL_KEY, "http://10.0.0.3:5000")
		.await
		.expect("Failed to overwrite setting.");

	assert_eq!(
		settings::get_setting(&db.pool, settings::API_URL_KEY).await.expect("Failed to read."),
		Some("http://10.0.0.3:5000".to_string())
	);

	db.pool.close().await;
}
