use crate::assist::{AssistClient, NO_DATA_MESSAGE};
use crate::model::trip::Trip;
use crate::state::AppState;
use crate::stats::{self, DashboardStats};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Number of trips shown in the "Recent Large Trips" panel.
const TOP_TRIPS: usize = 4;

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    /// Largest trips by amount, descending.
    pub top_trips: Vec<Trip>,
}

#[derive(Serialize, ToSchema)]
pub struct InsightsResponse {
    #[schema(example = "Spending is concentrated in the Sales department...")]
    pub insights: String,
}

/// Dashboard overview
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Derived statistics for the current collections", body = DashboardResponse)
    ),
    tag = "Dashboard",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let trips = state.trips();
    let employees = state.employees();

    HttpResponse::Ok().json(DashboardResponse {
        stats: stats::compute(&trips, &employees),
        top_trips: stats::top_trips(&trips, TOP_TRIPS),
    })
}

/// AI spending insights
#[utoipa::path(
    post,
    path = "/api/dashboard/insights",
    responses(
        (status = 200, description = "Narrative analysis, or the fallback text when the AI endpoint is unavailable", body = InsightsResponse)
    ),
    tag = "Dashboard",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_insights(
    state: web::Data<AppState>,
    assist: web::Data<AssistClient>,
) -> impl Responder {
    let trips = state.trips();

    // Nothing to analyze; skip the request entirely.
    if trips.is_empty() {
        return HttpResponse::Ok().json(InsightsResponse {
            insights: NO_DATA_MESSAGE.to_string(),
        });
    }

    let insights = assist.trip_insights(&trips).await;
    HttpResponse::Ok().json(InsightsResponse { insights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::INSIGHTS_FALLBACK;
    use crate::store::Store;
    use actix_web::{App, test};

    fn app_state() -> (tempfile::TempDir, web::Data<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(Store::open(dir.path()).unwrap());
        (dir, web::Data::new(state))
    }

    #[actix_web::test]
    async fn stats_reflect_seed_data() {
        let (_dir, state) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::resource("/dashboard/stats").route(web::get().to(get_stats))),
        )
        .await;

        let req = test::TestRequest::get().uri("/dashboard/stats").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["stats"]["total_spend"], 92.5);
        assert_eq!(body["stats"]["total_trips"], 3);
        assert_eq!(body["stats"]["pending_count"], 1);
        assert_eq!(body["stats"]["trips_by_day"][0]["date"], "2023-10-24");
        assert_eq!(body["stats"]["trips_by_day"][0]["count"], 2);
        assert_eq!(body["top_trips"][0]["amount"], 45.0);
    }

    #[actix_web::test]
    async fn insights_degrade_to_fallback_when_endpoint_unreachable() {
        let (_dir, state) = app_state();
        let assist = web::Data::new(AssistClient::new(
            "http://127.0.0.1:9",
            "gemini-3-flash-preview",
            "test-key",
        ));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(assist)
                .service(
                    web::resource("/dashboard/insights")
                        .route(web::post().to(generate_insights)),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/dashboard/insights")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["insights"], INSIGHTS_FALLBACK);
    }
}
