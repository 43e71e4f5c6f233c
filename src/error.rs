use std::fmt;

// =========================================================
// Error kinds
// =========================================================

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The identity provider rejected or aborted the login popup
    #[error("LOGIN_FAILED")]
    LoginFailed,
    /// The identity provider failed to end the session
    #[error("LOGOUT_FAILED")]
    LogoutFailed,
    /// `GET /userinfo` could not be completed
    #[error("USER_INFO_FETCH_FAILED")]
    UserInfoFetchFailed,
    /// The identity provider could not report a session or a token
    #[error("IDENTITY_ERROR")]
    Identity,
    /// The request never produced a response
    #[error("HTTP_ERROR")]
    Http,
    /// The server answered with a non-2xx status
    #[error("HTTP_STATUS_{0}")]
    Status(u16),
    /// JSON encoding or decoding failed
    #[error("JSON_PARSE_ERROR")]
    Serialization,
    /// Invalid or missing configuration
    #[error("CONFIG_ERROR")]
    Config,
}

// =========================================================
// Operation trace
// =========================================================

/// One step of the operation trace attached to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSpan {
    /// Operation name, e.g. "api.send", "identity.login"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// Core error type
// =========================================================

/// Client error: kind, message, optional cause and the operations it passed through.
#[derive(Debug)]
pub struct TrackerError {
    pub kind: ErrorKind,
    pub message: String,
    source: Option<Box<dyn std::error::Error + 'static>>,
    spans: Vec<ErrorSpan>,
}

impl TrackerError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn login_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LoginFailed, message)
    }

    pub fn logout_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LogoutFailed, message)
    }

    pub fn user_info_fetch_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserInfoFetchFailed, message)
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Identity, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Http, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Status(code), message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Re-labels the error while keeping its message, cause and trace.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    // --- Accessors ---

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::serialization(e.to_string()).with_source(e)
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
