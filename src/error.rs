use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("insufficient storage")]
    InsufficientStorage,
    #[error("missing paste field")]
    MissingPaste,
    #[error("error reading form data")]
    Form {
        #[from]
        source: FormRejection,
    },
    #[error("error reading multipart data")]
    Multipart {
        status: StatusCode,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("IO error")]
    IO { source: std::io::Error },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InsufficientStorage => StatusCode::INSUFFICIENT_STORAGE,
            ApiError::MissingPaste => StatusCode::BAD_REQUEST,
            // rejections carry their own status, e.g. 413 past the body limit
            ApiError::Form { source } => source.status(),
            ApiError::Multipart { status, .. } => *status,
            ApiError::IO { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            match &self {
                ApiError::IO { source } => error!("request failed: {self}: {source}"),
                _ => error!("request failed: {self}"),
            }
        } else {
            warn!("bad request: {self}");
        }

        (status_code, format!("{self}")).into_response()
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(source: MultipartRejection) -> Self {
        ApiError::Multipart {
            status: source.status(),
            source: Box::new(source),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(source: MultipartError) -> Self {
        ApiError::Multipart {
            status: source.status(),
            source: Box::new(source),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::StorageFull => ApiError::InsufficientStorage,
            _ => ApiError::IO { source },
        }
    }
}
