//! Error types for ytframe Core

use thiserror::Error;

/// Result type alias for loader and contract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Loader error types
#[derive(Error, Debug)]
pub enum Error {
    // Host environment errors
    #[error("No global window object available")]
    NoWindow,

    #[error("No document available in the host environment")]
    NoDocument,

    #[error("Document has no <body> element")]
    NoBody,

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("Failed to install global hook `{name}`")]
    HookInstall { name: String },

    #[error("JavaScript exception: {0}")]
    Js(String),

    // Contract errors
    #[error("Unknown player state code: {0}")]
    UnknownStateCode(i32),

    #[error("Unknown player error code: {0}")]
    UnknownErrorCode(i32),

    #[error("Unknown playback quality: {0}")]
    UnknownQuality(String),

    #[error("Unknown player event: {0}")]
    UnknownEvent(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a DOM error
    pub fn dom(msg: impl Into<String>) -> Self {
        Error::Dom(msg.into())
    }

    /// Returns true if the host environment itself is missing something
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            Error::NoWindow
                | Error::NoDocument
                | Error::NoBody
                | Error::Dom(_)
                | Error::HookInstall { .. }
                | Error::Js(_)
        )
    }

    /// Returns the error code for log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NoWindow => "NO_WINDOW",
            Error::NoDocument => "NO_DOCUMENT",
            Error::NoBody => "NO_BODY",
            Error::Dom(_) => "DOM",
            Error::HookInstall { .. } => "HOOK_INSTALL",
            Error::Js(_) => "JS",
            Error::UnknownStateCode(_) => "UNKNOWN_STATE",
            Error::UnknownErrorCode(_) => "UNKNOWN_ERROR_CODE",
            Error::UnknownQuality(_) => "UNKNOWN_QUALITY",
            Error::UnknownEvent(_) => "UNKNOWN_EVENT",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidVideoId(_) => "INVALID_VIDEO_ID",
            Error::Url(_) => "URL",
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}
