use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Application(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Application(s.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Application(s)
    }
}
