use crate::api::dashboard::{DashboardResponse, InsightsResponse};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::trip::{
    CreateTrip, SuggestTripReq, SuggestTripResponse, TripListResponse, TripQuery,
};
use crate::assist::TripSuggestion;
use crate::model::employee::Employee;
use crate::model::settings::AppSettings;
use crate::model::trip::{Trip, TripCategory, TripStatus};
use crate::model::user::User;
use crate::models::LoginReqDto;
use crate::state::UpdateEmployee;
use crate::stats::{DashboardStats, DayCount, DepartmentSpend};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TaxiManager Pro API",
        version = "1.0.0",
        description = r#"
## Corporate Taxi-Expense Admin

This API powers **TaxiManager Pro**, an admin dashboard for corporate taxi
expenses: employees log trips, managers approve or reject them, and aggregate
spend is visualized with AI-generated narrative insights.

### 🔹 Key Features
- **Trip Management**
  - Log trips, browse history, approve/reject pending expenses
- **Employee Directory**
  - Create, update, list, and remove employees
- **Dashboard**
  - Derived spend statistics plus AI spending insights
- **AI Assist**
  - Best-effort purpose/category autofill for a pickup/dropoff pair

### 🔐 Security
The login is a stub: any non-empty credentials fabricate the manager session
and return a **JWT Bearer token** required by the `/api` routes.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::trip::create_trip,
        crate::api::trip::list_trips,
        crate::api::trip::get_trip,
        crate::api::trip::approve_trip,
        crate::api::trip::reject_trip,
        crate::api::trip::suggest_trip,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::dashboard::get_stats,
        crate::api::dashboard::generate_insights,

        crate::api::settings::get_settings,
        crate::api::settings::update_settings
    ),
    components(
        schemas(
            LoginReqDto,
            User,
            Trip,
            TripStatus,
            TripCategory,
            TripQuery,
            TripListResponse,
            CreateTrip,
            SuggestTripReq,
            SuggestTripResponse,
            TripSuggestion,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            DashboardResponse,
            DashboardStats,
            DepartmentSpend,
            DayCount,
            InsightsResponse,
            AppSettings
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Stub session APIs"),
        (name = "Trips", description = "Trip logging and approval APIs"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Dashboard", description = "Derived statistics and AI insights"),
        (name = "Settings", description = "Application settings APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
