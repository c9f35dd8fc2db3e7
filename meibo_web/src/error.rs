use std::error::Error;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meibo::domain::{customer::CustomerError, DataAccessError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// APIエラー
#[derive(Error, Debug)]
pub enum ApiError {
    /// リクエストボディが顧客の入力内容として不正
    #[error("Invalid customer payload: {0}")]
    InvalidPayload(String),
    /// IDが不正
    #[error("Invalid customer id: {0}")]
    InvalidId(String),
    #[error("Customer not found")]
    NotFound,
    #[error("{message}: {source}")]
    Server {
        message: &'static str,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl ApiError {
    /// ストア層のエラーを `message` 付きで包む
    pub fn store(message: &'static str) -> impl FnOnce(DataAccessError) -> Self {
        move |source| Self::Server {
            message,
            source: Box::new(source),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::InvalidPayload(value.body_text())
    }
}

impl From<CustomerError> for ApiError {
    fn from(value: CustomerError) -> Self {
        Self::InvalidPayload(value.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidPayload(detail) => {
                warn!("不正な顧客データ: {}", detail);
                MessageBody {
                    message: "Invalid customer payload".to_owned(),
                    error: Some(detail),
                }
            }
            Self::InvalidId(detail) => MessageBody {
                message: "Invalid customer id".to_owned(),
                error: Some(detail),
            },
            Self::NotFound => MessageBody::new("Customer not found"),
            Self::Server { message, source } => {
                error!("{}: {}", message, source);
                MessageBody {
                    message: message.to_owned(),
                    error: Some(source.to_string()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
