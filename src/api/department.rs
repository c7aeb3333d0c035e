use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::model::department::NewDepartment;
use crate::repository::DepartmentRepository;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentSearch {
    /// Case-insensitive fragment of the department name; omitted matches all
    pub name: Option<String>,
}

/// List all departments
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments ordered by id", body = [Department]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Department"
)]
pub async fn list_departments(
    repo: web::Data<dyn DepartmentRepository>,
) -> Result<HttpResponse, ApiError> {
    let departments = repo.find_all().await?;
    Ok(HttpResponse::Ok().json(departments))
}

/// Search departments by name fragment
#[utoipa::path(
    get,
    path = "/api/departments/search",
    params(DepartmentSearch),
    responses(
        (status = 200, description = "Departments whose name contains the fragment, ignoring case", body = [Department]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn search_departments(
    repo: web::Data<dyn DepartmentRepository>,
    query: web::Query<DepartmentSearch>,
) -> Result<HttpResponse, ApiError> {
    let fragment = query.name.as_deref().unwrap_or_default();
    debug!(fragment, "Searching departments by name");

    let departments = repo.find_by_name_containing_ignore_case(fragment).await?;
    Ok(HttpResponse::Ok().json(departments))
}

/// Get Department by ID
#[utoipa::path(
    get,
    path = "/api/departments/{department_id}",
    params(
        ("department_id", Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = Department),
        (status = 404, description = "Department not found", body = Object, example = json!({
            "message": "Department not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn get_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let department_id = path.into_inner();

    match repo.find_by_id(department_id).await? {
        Some(department) => Ok(HttpResponse::Ok().json(department)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Department not found"
        }))),
    }
}

/// Create Department
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = NewDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Invalid name", body = Object, example = json!({
            "message": "Department name must not be empty"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn create_department(
    repo: web::Data<dyn DepartmentRepository>,
    payload: web::Json<NewDepartment>,
) -> Result<HttpResponse, ApiError> {
    let created = repo.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Rename Department
#[utoipa::path(
    put,
    path = "/api/departments/{department_id}",
    params(
        ("department_id", Path, description = "Department ID")
    ),
    request_body = NewDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn update_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<u64>,
    payload: web::Json<NewDepartment>,
) -> Result<HttpResponse, ApiError> {
    let updated = repo.update(path.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete Department
#[utoipa::path(
    delete,
    path = "/api/departments/{department_id}",
    params(
        ("department_id", Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Department"
)]
pub async fn delete_department(
    repo: web::Data<dyn DepartmentRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    repo.delete_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
