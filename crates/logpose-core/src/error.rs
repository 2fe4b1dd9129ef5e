use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogPoseError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LogPoseError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    /// The message without the variant prefix; what goes into the
    /// `error` field of a response body.
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized(m) | Self::InvalidInput(m) | Self::NotFound(m) => m.clone(),
            Self::Internal(e) => e.to_string(),
        }
    }

    /// Inverse of [`http_status`](Self::http_status), used by the HTTP client
    /// to rebuild a typed error from a `{success: false, error}` body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(message),
            400 | 422 => Self::InvalidInput(message),
            404 => Self::NotFound(message),
            _ => Self::Internal(anyhow::anyhow!("HTTP {status}: {message}")),
        }
    }
}
