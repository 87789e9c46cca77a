use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee as resolved from a badge scan: just what the attendance
/// policy needs.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id_empleado: u64,
    pub nombre: String,
    pub activo: bool,
}

/// Row returned by the listing join over empleados, tiendas and usuarios.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id_empleado": 1,
        "nombre": "Ana",
        "apellido": "Pérez",
        "email": "ana.perez@tienda.com",
        "puesto_trabajo": "Cajera",
        "telefono": "+54 11 5555-0101",
        "tienda_nombre": "Sucursal Centro",
        "genero": "F",
        "activo": true
    })
)]
pub struct EmployeeListing {
    #[schema(example = 1)]
    pub id_empleado: u64,

    #[schema(example = "Ana")]
    pub nombre: String,

    #[schema(example = "Pérez")]
    pub apellido: String,

    #[schema(example = "ana.perez@tienda.com")]
    pub email: String,

    #[schema(example = "Cajera")]
    pub puesto_trabajo: String,

    #[schema(example = "+54 11 5555-0101", nullable = true)]
    pub telefono: Option<String>,

    #[schema(example = "Sucursal Centro")]
    pub tienda_nombre: String,

    #[schema(example = "F")]
    pub genero: String,

    #[schema(example = true)]
    pub activo: bool,
}
