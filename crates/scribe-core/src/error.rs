//! Unified application error.
//!
//! `AppError` is what the session service and the HTTP handlers report. Storage and
//! provider failures are converted into it at the crate boundaries. How each variant is
//! shown to a caller (status, code, client message, log level) is fixed in one table,
//! `presentation`, and exposed through [`ErrorMetadata`].

/// Severity used when an error is logged at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes: missing files, bad names, blank API key
    Debug,
    /// The provider rejected or failed the caller's audio
    Warn,
    /// Our own storage or runtime failed
    Error,
}

/// Describes how an error is presented to an HTTP caller
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code, e.g. `TRANSCRIPTION_ERROR`
    fn error_code(&self) -> &'static str;

    /// Whether sending the same request again may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message that is safe to put in a response body
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their details, in any environment
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Carries the client-facing message only; the storage detail is logged where the
    /// error is raised.
    #[error("Storage error: {0}")]
    Storage(String),

    /// `<stage>: <detail>` of the first failed file, provider body included
    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

const RETRY_LATER: Option<&str> = Some("Retry after a short delay");

const INTERNAL: Presentation = Presentation {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    action: RETRY_LATER,
    sensitive: true,
    level: LogLevel::Error,
};

fn presentation(err: &AppError) -> Presentation {
    match err {
        AppError::InvalidInput(_) => Presentation {
            status: 400,
            code: "INVALID_INPUT",
            recoverable: false,
            action: Some("Provide an AssemblyAI API key and at least one audio file"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::BadRequest(_) => Presentation {
            status: 400,
            code: "BAD_REQUEST",
            recoverable: false,
            action: Some("Check the form fields and file names"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::NotFound(_) => Presentation {
            status: 404,
            code: "NOT_FOUND",
            recoverable: false,
            action: Some("The transcript may have expired; upload the files again"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::Storage(_) => Presentation {
            status: 500,
            code: "STORAGE_ERROR",
            recoverable: true,
            action: RETRY_LATER,
            sensitive: false,
            level: LogLevel::Error,
        },
        AppError::Transcription(_) => Presentation {
            status: 500,
            code: "TRANSCRIPTION_ERROR",
            recoverable: false,
            action: Some("Check the API key and audio files, then try again"),
            sensitive: false,
            level: LogLevel::Warn,
        },
        AppError::Internal(_) | AppError::InternalWithSource { .. } => INTERNAL,
    }
}

impl AppError {
    /// Variant name, reported as `error_type` outside production
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Storage(_) => "Storage",
            AppError::Transcription(_) => "Transcription",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by up to five `Caused by:` lines
    pub fn details(&self) -> String {
        use std::error::Error;
        const MAX_DEPTH: usize = 5;

        let mut out = self.to_string();
        let mut cause = self.source();
        let mut depth = 0;

        while let Some(err) = cause {
            if depth == MAX_DEPTH {
                out.push_str("\n  ... (truncated)");
                break;
            }
            out.push_str(&format!("\n  Caused by: {}", err));
            cause = err.source();
            depth += 1;
        }

        out
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        presentation(self).status
    }

    fn error_code(&self) -> &'static str {
        presentation(self).code
    }

    fn is_recoverable(&self) -> bool {
        presentation(self).recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        presentation(self).action
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Storage(msg) => msg.clone(),
            AppError::Transcription(msg) => format!("Transcription failed: {}", msg),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        presentation(self).sensitive
    }

    fn log_level(&self) -> LogLevel {
        presentation(self).level
    }
}
