use libraryapi_model::model::error::LibraryError;
use thiserror::Error;
use tracing::error;

/// Application error types.
///
/// Represents all possible errors that can occur in the library service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Internal application error.
    ///
    /// Storage, configuration and runtime failures the caller cannot fix.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Domain error.
    ///
    /// Validation, precondition and referential failures surfaced to callers.
    #[error(transparent)]
    Library(#[from] LibraryError),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Classification of errors for callers that map them to protocol codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    FailedPrecondition,
    NotFound,
    AlreadyExists,
    Internal,
}

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    config::ConfigError,
    rusqlite::Error,
    tokio::task::JoinError
);

impl AppError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        let message: String = message.into();
        AppError::Internal(message.into())
    }

    pub fn as_library(&self) -> Option<&LibraryError> {
        match self {
            AppError::Library(err) => Some(err),
            AppError::Internal(_) => None,
        }
    }

    /// Classifies the error.
    ///
    /// Internal errors are logged here, since their details are not passed on.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Library(err) => match err {
                LibraryError::Validation { .. } | LibraryError::InvalidArgument(_) => {
                    ErrorCode::InvalidArgument
                }
                LibraryError::OperationNotAllowed(_) => ErrorCode::FailedPrecondition,
                LibraryError::NotFound { .. } => ErrorCode::NotFound,
                LibraryError::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            },
            AppError::Internal(_) => {
                error!("internal service error: {}", self);
                ErrorCode::Internal
            }
        }
    }
}

impl ErrorCode {
    /// HTTP status conventionally used for this code.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::InvalidArgument => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::FailedPrecondition | ErrorCode::AlreadyExists => 409,
            ErrorCode::Internal => 500,
        }
    }

    pub fn as_str_name(self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::FailedPrecondition => "FAILED_PRECONDITION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use libraryapi_model::model::error::{CommonError, FieldViolation};

    use super::*;

    #[test]
    fn classify() {
        let err: AppError = LibraryError::validation(
            "author",
            [FieldViolation::new("name", CommonError::RequiredFieldMissing)],
        )
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(err.code().http_status(), 400);

        let err: AppError = LibraryError::OperationNotAllowed("referenced".into()).into();
        assert_eq!(err.code(), ErrorCode::FailedPrecondition);
        assert_eq!(err.code().http_status(), 409);

        let err: AppError = LibraryError::not_found("authors/1").into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = AppError::internal("lock poisoned");
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.to_string(), "internal error: lock poisoned");
        assert!(err.as_library().is_none());
    }
}
