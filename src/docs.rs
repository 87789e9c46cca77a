use crate::api::registration::RegistroRequest;
use crate::model::attendance::EventType;
use crate::model::employee::EmployeeListing;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RFID Attendance API",
        version = "1.0.0",
        description = r#"
## RFID Attendance Service

Records employee clock-in/clock-out events captured by RFID badge readers.

### 🔹 Key Features
- **Attendance Registration**
  - Resolve a badge uid to an employee and append the day's entrada/salida
  - At most 2 events per employee per day, one of each type
  - A salida is only accepted 2 hours after the day's entrada
- **Employee Listing**
  - All employees with store and gender attributes

### 📦 Response Format
- JSON responses; failures carry `{"error": "..."}` with a stable message per kind

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::listing::list_employees,
        crate::api::registration::register_attendance,
    ),
    components(
        schemas(
            EmployeeListing,
            RegistroRequest,
            EventType,
        )
    ),
    tags(
        (name = "Empleados", description = "Employee listing APIs"),
        (name = "Asistencia", description = "Attendance registration APIs"),
    )
)]
pub struct ApiDoc;
