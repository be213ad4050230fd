use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: credentials rejected by server")]
    Unauthorized,

    #[error("server returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid response from server: {0}")]
    InvalidServerResponse(String),

    #[error("no refresh token found")]
    MissingRefreshToken,

    #[error("credential storage error: {0}")]
    CredentialStorage(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True when the server rejected the presented credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
