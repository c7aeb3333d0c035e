use crate::model::department::{Department, NewDepartment};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Department Directory API",
        version = "0.1.0",
        description = r#"
## Department Directory

Look up and maintain the departments of an organization.

### 🔹 Key Features
- **Department Search**
  - Find departments whose name contains a fragment, ignoring case
- **Department Management**
  - Create, rename, list, view and delete departments

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry a single `message` field

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::department::list_departments,
        crate::api::department::search_departments,
        crate::api::department::get_department,
        crate::api::department::create_department,
        crate::api::department::update_department,
        crate::api::department::delete_department
    ),
    components(
        schemas(
            Department,
            NewDepartment
        )
    ),
    tags(
        (name = "Department", description = "Department lookup and management APIs"),
    )
)]
pub struct ApiDoc;
