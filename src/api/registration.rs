use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::attendance::EventType;
use crate::service::policy::Outcome;
use crate::service::{badge, policy};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegistroRequest {
    /// Badge uid as read by the RFID reader.
    #[schema(example = "04A224E2BC5E80")]
    pub uid: Option<String>,

    /// "entrada" or "salida"; defaults to "entrada" when omitted.
    #[schema(example = "entrada", nullable = true)]
    pub tipo: Option<String>,
}

impl RegistroRequest {
    /// Structural validation before any store access: non-empty uid and a
    /// recognized event type, matched case-insensitively.
    pub fn validated(&self) -> Result<(&str, EventType), ApiError> {
        let uid = match self.uid.as_deref() {
            Some(uid) if !uid.trim().is_empty() => uid,
            _ => return Err(ApiError::MissingUid),
        };

        let tipo = match self.tipo.as_deref() {
            None => EventType::Entry,
            Some(raw) => raw
                .to_lowercase()
                .parse::<EventType>()
                .map_err(|_| ApiError::InvalidEventType)?,
        };

        Ok((uid, tipo))
    }
}

/// Attendance registration endpoint
#[utoipa::path(
    post,
    path = "/registro",
    request_body = RegistroRequest,
    responses(
        (status = 200, description = "Event registered", body = Object, example = json!({
            "mensaje": "Registro de asistencia para Ana agregado exitosamente"
        })),
        (status = 400, description = "Missing uid or unrecognized tipo", body = Object, example = json!({
            "error": "Falta uid"
        })),
        (status = 403, description = "Employee is inactive", body = Object, example = json!({
            "error": "Empleado inactivo"
        })),
        (status = 404, description = "Badge not assigned to any employee", body = Object, example = json!({
            "error": "UID no asignado a ningún empleado"
        })),
        (status = 409, description = "Duplicate event, daily limit reached or minimum gap not elapsed", body = Object, example = json!({
            "error": "El empleado ya marcó su asistencia del día"
        })),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "No se pudo conectar a la base de datos"
        }))
    ),
    tag = "Asistencia"
)]
pub async fn register_attendance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RegistroRequest>,
) -> Result<HttpResponse, ApiError> {
    let (uid, tipo) = payload.validated()?;

    let employee = badge::resolve(pool.get_ref(), uid)
        .await?
        .ok_or(ApiError::UnknownBadge)?;

    let now = Local::now().naive_local();

    match policy::evaluate_and_register(pool.get_ref(), &employee, tipo, now).await? {
        Outcome::Registered(mensaje) => {
            info!(
                id_empleado = employee.id_empleado,
                tipo = tipo.as_str(),
                "attendance recorded"
            );
            Ok(HttpResponse::Ok().json(json!({ "mensaje": mensaje })))
        }
        Outcome::Rejected(reason) => Err(ApiError::Rejected(reason)),
    }
}
