mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	net::SocketAddr,
	path::{Path, PathBuf},
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	body::Bytes,
	extract::{Path as UrlPath, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::post,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use uuid::Uuid;

/// A throwaway SQLite database file under the system temp directory. The file and its WAL/SHM
/// siblings are removed on [`TestDatabase::cleanup`] or drop.
pub struct TestDatabase {
	path: PathBuf,
	cleaned: bool,
}
impl TestDatabase {
	pub fn new() -> Self {
		let path = env::temp_dir().join(format!("ruby_test_{}.db", Uuid::new_v4().simple()));

		Self { path, cleaned: false }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn config(&self) -> ruby_config::Sqlite {
		ruby_config::Sqlite { path: self.path.to_string_lossy().into_owned(), pool_max_conns: 1 }
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		for path in sqlite_files(&self.path) {
			match fs::remove_file(&path) {
				Ok(()) => {},
				Err(err) if err.kind() == std::io::ErrorKind::NotFound => {},
				Err(err) => return Err(err.into()),
			}
		}

		self.cleaned = true;

		Ok(())
	}
}
impl Default for TestDatabase {
	fn default() -> Self {
		Self::new()
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test database cleanup failed: {err}.");
		}
	}
}

/// One request received by a [`StubBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub path: String,
	pub body: Value,
	pub headers: Vec<(String, String)>,
}

/// How a [`StubBackend`] answers every request.
#[derive(Debug, Clone)]
pub enum StubReply {
	Json(Value),
	Status(StatusCode),
	Text(String),
}

#[derive(Clone)]
struct StubState {
	reply: StubReply,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Chat backend stand-in bound to `127.0.0.1:0`. Every `POST /{path}` is recorded and answered
/// with the configured [`StubReply`].
pub struct StubBackend {
	addr: SocketAddr,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
	shutdown: Option<oneshot::Sender<()>>,
	handle: Option<JoinHandle<()>>,
}
impl StubBackend {
	pub async fn start(reply: StubReply) -> Result<Self> {
		let requests = Arc::new(Mutex::new(Vec::new()));
		let state = StubState { reply, requests: requests.clone() };
		let app = Router::new().route("/{*path}", post(record_and_reply)).with_state(state);
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app)
				.with_graceful_shutdown(async {
					let _ = shutdown_rx.await;
				})
				.await;
		});

		Ok(Self { addr, requests, shutdown: Some(shutdown_tx), handle: Some(handle) })
	}

	pub async fn json(body: Value) -> Result<Self> {
		Self::start(StubReply::Json(body)).await
	}

	pub fn base_url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub async fn shutdown(mut self) -> Result<()> {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
		if let Some(handle) = self.handle.take() {
			handle
				.await
				.map_err(|err| Error::Message(format!("Stub backend task failed: {err}.")))?;
		}

		Ok(())
	}
}
impl Drop for StubBackend {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

/// Config for a test assistant pointing at `api_base` and the given database file.
pub fn test_config(api_base: &str, sqlite: ruby_config::Sqlite) -> ruby_config::Config {
	ruby_config::Config {
		service: ruby_config::Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "debug".to_string(),
		},
		storage: ruby_config::Storage { sqlite },
		backend: ruby_config::Backend {
			api_base: api_base.trim_end_matches('/').to_string(),
			timeout_ms: 2_000,
			default_headers: Default::default(),
		},
		device: ruby_config::Device {
			platform: ruby_config::Platform::Android,
			default_city: None,
			contacts: Vec::new(),
		},
		music: Default::default(),
		voice: Default::default(),
		speech: Default::default(),
		reminders: Default::default(),
	}
}

async fn record_and_reply(
	State(state): State<StubState>,
	UrlPath(path): UrlPath<String>,
	headers: HeaderMap,
	body: Bytes,
) -> Response {
	let headers = headers
		.iter()
		.map(|(name, value)| {
			(name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
		})
		.collect();
	let request = RecordedRequest {
		path: format!("/{path}"),
		body: serde_json::from_slice(&body).unwrap_or(Value::Null),
		headers,
	};

	state.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request);

	match state.reply {
		StubReply::Json(body) => Json(body).into_response(),
		StubReply::Status(status) => status.into_response(),
		StubReply::Text(text) => text.into_response(),
	}
}

fn sqlite_files(path: &Path) -> [PathBuf; 3] {
	let base = path.to_string_lossy().into_owned();

	[path.to_path_buf(), PathBuf::from(format!("{base}-wal")), PathBuf::from(format!("{base}-shm"))]
}
