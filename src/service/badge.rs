use sqlx::MySqlPool;
use tracing::warn;

use crate::error::StoreError;
use crate::model::employee::Employee;

/// Resolves an RFID badge uid to the employee it is assigned to.
///
/// `Ok(None)` is the normal "badge not enrolled" outcome, distinct from a
/// store failure. The lookup does not assume the assignment is 1:1: more
/// than one match is treated as corrupt data.
pub async fn resolve(pool: &MySqlPool, uid: &str) -> Result<Option<Employee>, StoreError> {
    let mut matches = sqlx::query_as::<_, Employee>(
        r#"
        SELECT e.id_empleado, e.nombre, e.activo
        FROM empleados e
        JOIN rfid_empleados r ON e.id_empleado = r.id_empleado
        WHERE r.uid = ?
        "#,
    )
    .bind(uid)
    .fetch_all(pool)
    .await?;

    if matches.len() > 1 {
        warn!(uid, matches = matches.len(), "badge uid assigned to more than one employee");
        return Err(StoreError::CorruptAssignment);
    }

    Ok(matches.pop())
}
