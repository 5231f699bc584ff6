use crate::model::settings::AppSettings;
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::error;

/// Get settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current application settings", body = AppSettings)
    ),
    tag = "Settings",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_settings(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.settings())
}

/// Update settings
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = AppSettings,
    responses(
        (status = 200, description = "Settings updated", body = Object, example = json!({
            "message": "Settings updated"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Settings",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_settings(
    state: web::Data<AppState>,
    payload: web::Json<AppSettings>,
) -> impl Responder {
    match state.update_settings(payload.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Settings updated"
        })),
        Err(e) => {
            error!(error = %e, "Failed to save settings");
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

    #[actix_web::test]
    async fn settings_round_trip_through_the_api() {
        let dir = tempfile::tempdir().unwrap();
        let state = web::Data::new(AppState::load(Store::open(dir.path()).unwrap()));
        let app = test::init_service(
            App::new().app_data(state).service(
                web::resource("/settings")
                    .route(web::get().to(get_settings))
                    .route(web::put().to(update_settings)),
            ),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/settings")
            .set_json(json!({
                "currency": "EUR",
                "auto_ai": false,
                "dark_mode": true,
                "company_name": "Globex",
                "monthly_budget": 7500.0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/settings").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["monthly_budget"], 7500.0);
    }
}
