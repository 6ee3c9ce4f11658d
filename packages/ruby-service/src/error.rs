pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Device error: {message}")]
	Device { message: String },
	#[error("Unavailable: {message}")]
	Unavailable { message: String },
}
impl From<ruby_storage::Error> for Error {
	fn from(err: ruby_storage::Error) -> Self {
		match err {
			ruby_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			ruby_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			ruby_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}

impl From<ruby_providers::Error> for Error {
	fn from(err: ruby_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
