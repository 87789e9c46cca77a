use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;
use tracing::{debug, error};

use crate::error::{ApiError, StoreError};
use crate::model::employee::EmployeeListing;

/// Employee listing endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All employees with store and gender attributes", body = [EmployeeListing]),
        (status = 500, description = "Store unavailable", body = Object, example = json!({
            "error": "No se pudo conectar a la base de datos"
        }))
    ),
    tag = "Empleados"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let empleados = sqlx::query_as::<_, EmployeeListing>(
        r#"
        SELECT e.id_empleado, e.nombre, e.apellido, e.email, e.puesto_trabajo, e.telefono,
               t.nombre AS tienda_nombre, u.genero, e.activo
        FROM empleados e
        JOIN tiendas t ON e.id_tienda = t.id_tienda
        JOIN usuarios u ON e.id_empleado = u.id_empleado
        ORDER BY e.id_empleado
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "employee listing query failed");
        ApiError::from(StoreError::from(e))
    })?;

    debug!(count = empleados.len(), "employees listed");
    Ok(HttpResponse::Ok().json(empleados))
}
