use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::{Display, From};
use serde_json::json;

use crate::service::policy::RejectReason;

/// Failure of the store collaborator, as opposed to a business rejection.
#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Db(sqlx::Error),

    /// A badge uid resolved to more than one employee. The schema implies
    /// 1:1 but does not enforce it; multiple matches are treated as store
    /// data corruption.
    #[display(fmt = "badge uid assigned to multiple employees")]
    CorruptAssignment,
}

/// Everything the HTTP surface can answer with, short of a 200.
///
/// `Display` carries the user-facing reason string; internal detail (the
/// underlying `sqlx::Error` text) is logged at the point of failure and
/// never leaks into the response body.
#[derive(Debug, Display, From)]
pub enum ApiError {
    #[display(fmt = "Falta uid")]
    MissingUid,

    #[display(fmt = "Tipo inválido. Solo 'entrada' o 'salida'")]
    InvalidEventType,

    #[display(fmt = "UID no asignado a ningún empleado")]
    UnknownBadge,

    #[display(fmt = "{}", _0)]
    Rejected(RejectReason),

    #[display(fmt = "No se pudo conectar a la base de datos")]
    Store(StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUid | ApiError::InvalidEventType => StatusCode::BAD_REQUEST,
            ApiError::UnknownBadge => StatusCode::NOT_FOUND,
            ApiError::Rejected(RejectReason::InactiveEmployee) => StatusCode::FORBIDDEN,
            ApiError::Rejected(_) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
