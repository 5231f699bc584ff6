use crate::model::employee::Employee;
use crate::state::{AppState, UpdateEmployee};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Sarah Chen")]
    pub name: String,
    #[schema(example = "Sales")]
    pub department: String,
    #[schema(example = "sarah.c@company.com", format = "email")]
    pub email: String,
    #[schema(nullable = true)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Items per page
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by department
    #[schema(example = "Sales")]
    pub department: Option<String>,
    /// Search by name or email
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 3)]
    pub total: usize,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created successfully", body = Employee),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<CreateEmployee>,
) -> impl Responder {
    let payload = payload.into_inner();
    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        department: payload.department,
        email: payload.email,
        avatar: payload.avatar,
    };

    match state.add_employee(employee.clone()) {
        Ok(()) => HttpResponse::Ok().json(employee),
        Err(e) => {
            error!(error = %e, "Failed to create employee");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> impl Responder {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut employees = state.employees();
    if let Some(department) = &query.department {
        employees.retain(|e| &e.department == department);
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        employees.retain(|e| {
            e.name.to_lowercase().contains(&needle) || e.email.to_lowercase().contains(&needle)
        });
    }

    let total = employees.len();
    let data: Vec<Employee> = employees
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    })
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Employee updated successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> impl Responder {
    let employee_id = path.into_inner();

    match state.update_employee(&employee_id, payload.into_inner()) {
        Ok(true) => HttpResponse::Ok().json(json!({
            "message": "Employee updated successfully"
        })),
        Ok(false) => HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })),
        Err(e) => {
            error!(error = %e, employee_id, "Failed to update employee");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// Delete Employee
///
/// Trips logged against the employee keep their reference; the dashboard
/// buckets them under "Other" from then on.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let employee_id = path.into_inner();

    match state.delete_employee(&employee_id) {
        Ok(true) => HttpResponse::Ok().json(json!({
            "message": "Successfully deleted"
        })),
        Ok(false) => HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })),
        Err(e) => {
            error!(error = %e, employee_id, "Failed to delete employee");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use actix_web::{App, test};

    fn app_state() -> (tempfile::TempDir, web::Data<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(Store::open(dir.path()).unwrap());
        (dir, web::Data::new(state))
    }

    #[actix_web::test]
    async fn list_filters_by_department() {
        let (_dir, state) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::resource("/employees").route(web::get().to(list_employees))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/employees?department=Engineering")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["name"], "James Wilson");
    }

    #[actix_web::test]
    async fn delete_returns_404_for_unknown_id() {
        let (_dir, state) = app_state();
        let app = test::init_service(
            App::new().app_data(state).service(
                web::resource("/employees/{id}").route(web::delete().to(delete_employee)),
            ),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/employees/unknown")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
