use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use utoipa::ToSchema;

/// The two recognized attendance event types for a work day.
///
/// Parsed from the wire with `FromStr` after lowercasing; stored in
/// `asistencia.tipo` as the Spanish literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, ToSchema)]
pub enum EventType {
    #[serde(rename = "entrada")]
    #[strum(serialize = "entrada")]
    Entry,
    #[serde(rename = "salida")]
    #[strum(serialize = "salida")]
    Exit,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Entry => "entrada",
            EventType::Exit => "salida",
        }
    }
}

/// One row of `asistencia`. Append-only: created once per admitted
/// registration, never updated or deleted.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceEvent {
    pub id: u64,
    pub id_empleado: u64,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub tipo: String,
}

impl AttendanceEvent {
    /// `tipo` as stored may predate the current enum; unknown values
    /// resolve to `None` and are ignored by the policy.
    pub fn event_type(&self) -> Option<EventType> {
        self.tipo.parse().ok()
    }
}
