use rusqlite::ErrorCode;
use thiserror::Error;

/// Broad classification of a failed database call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// The connection could not be opened, is busy, or has been closed.
    Connection,
    /// A table constraint (NOT NULL, CHECK, ...) rejected the statement.
    Constraint,
    /// Anything else: bad SQL, type mismatches, missing tables.
    Query,
}

impl std::fmt::Display for DbErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection => write!(f, "connection"),
            Self::Constraint => write!(f, "constraint"),
            Self::Query => write!(f, "query"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database {kind} error: {message}")]
    Database { kind: DbErrorKind, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn database(kind: DbErrorKind, message: impl Into<String>) -> Self {
        Self::Database {
            kind,
            message: message.into(),
        }
    }

    pub fn db_kind(&self) -> Option<DbErrorKind> {
        match self {
            Self::Database { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.db_kind() == Some(DbErrorKind::Constraint)
    }

    pub fn is_connection_error(&self) -> bool {
        self.db_kind() == Some(DbErrorKind::Connection)
    }
}

fn classify(err: &rusqlite::Error) -> DbErrorKind {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => DbErrorKind::Constraint,
        Some(
            ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::NotADatabase
            | ErrorCode::PermissionDenied,
        ) => DbErrorKind::Connection,
        _ => DbErrorKind::Query,
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::database(classify(&err), err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for AppError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Rusqlite(e) => e.into(),
            tokio_rusqlite::Error::ConnectionClosed => {
                Self::database(DbErrorKind::Connection, "connection closed")
            }
            tokio_rusqlite::Error::Close((_, e)) => {
                Self::database(DbErrorKind::Connection, e.to_string())
            }
            other => Self::database(DbErrorKind::Query, other.to_string()),
        }
    }
}
