use crate::assist::{AssistClient, TripSuggestion};
use crate::model::trip::{Trip, TripCategory, TripStatus};
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateTrip {
    #[schema(example = "1")]
    pub employee_id: String,
    #[schema(example = "2023-10-24", format = "date")]
    pub date: String,
    #[schema(example = "09:00")]
    pub time: String,
    #[schema(example = "Downtown Office")]
    pub pickup: String,
    #[schema(example = "Client HQ - Tech Park")]
    pub dropoff: String,
    #[schema(example = 32.50)]
    pub amount: f64,
    /// Defaults to the configured currency when omitted.
    #[schema(example = "USD", nullable = true)]
    pub currency: Option<String>,
    #[schema(example = "Q4 Strategy Meeting")]
    pub purpose: String,
    #[schema(example = "Client Meeting")]
    pub category: TripCategory,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TripQuery {
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Items per page
    #[schema(example = 20)]
    pub per_page: Option<u32>,
    /// Filter by lifecycle status
    #[schema(example = "Pending")]
    pub status: Option<TripStatus>,
    /// Filter by employee
    #[schema(example = "1")]
    pub employee_id: Option<String>,
    /// Search over pickup, dropoff and purpose
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct TripListResponse {
    pub data: Vec<Trip>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 3)]
    pub total: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct SuggestTripReq {
    #[schema(example = "Downtown Office")]
    pub pickup: String,
    #[schema(example = "Airport Terminal 2")]
    pub dropoff: String,
}

#[derive(Serialize, ToSchema)]
pub struct SuggestTripResponse {
    /// `null` when no suggestion is available; callers keep their
    /// existing form values in that case.
    pub suggestion: Option<TripSuggestion>,
}

/// Log a trip
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTrip,
    responses(
        (status = 200, description = "Trip submitted", body = Object, example = json!({
            "message": "Trip submitted",
            "status": "Pending"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_trip(
    state: web::Data<AppState>,
    payload: web::Json<CreateTrip>,
) -> impl Responder {
    let payload = payload.into_inner();
    let currency = payload
        .currency
        .unwrap_or_else(|| state.settings().currency);

    let trip = Trip {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        date: payload.date,
        time: payload.time,
        pickup: payload.pickup,
        dropoff: payload.dropoff,
        amount: payload.amount,
        currency,
        status: TripStatus::Pending,
        purpose: payload.purpose,
        category: payload.category,
    };

    match state.add_trip(trip.clone()) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Trip submitted",
            "status": TripStatus::Pending,
            "trip": trip
        })),
        Err(e) => {
            error!(error = %e, "Failed to save trip");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// Trip history
#[utoipa::path(
    get,
    path = "/api/trips",
    params(TripQuery),
    responses(
        (status = 200, description = "Paginated trip list", body = TripListResponse)
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_trips(
    state: web::Data<AppState>,
    query: web::Query<TripQuery>,
) -> impl Responder {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut trips = state.trips();
    if let Some(status) = query.status {
        trips.retain(|t| t.status == status);
    }
    if let Some(employee_id) = &query.employee_id {
        trips.retain(|t| &t.employee_id == employee_id);
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        trips.retain(|t| {
            t.pickup.to_lowercase().contains(&needle)
                || t.dropoff.to_lowercase().contains(&needle)
                || t.purpose.to_lowercase().contains(&needle)
        });
    }

    let total = trips.len();
    let data: Vec<Trip> = trips
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    HttpResponse::Ok().json(TripListResponse {
        data,
        page,
        per_page,
        total,
    })
}

/// Get trip by ID
#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}",
    params(
        ("trip_id", Path, description = "Trip ID")
    ),
    responses(
        (status = 200, description = "Trip found", body = Trip),
        (status = 404, description = "Trip not found", body = Object, example = json!({
            "message": "Trip not found"
        }))
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_trip(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let trip_id = path.into_inner();

    match state.trips().into_iter().find(|t| t.id == trip_id) {
        Some(trip) => HttpResponse::Ok().json(trip),
        None => HttpResponse::NotFound().json(json!({
            "message": "Trip not found"
        })),
    }
}

/// Approve trip
#[utoipa::path(
    put,
    path = "/api/trips/{trip_id}/approve",
    params(
        ("trip_id", Path, description = "ID of the trip to approve")
    ),
    responses(
        (status = 200, description = "Trip approved", body = Object, example = json!({
            "message": "Trip approved"
        })),
        (status = 400, description = "Trip not found or already processed", body = Object, example = json!({
            "message": "Trip not found or already processed"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn approve_trip(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    set_status(state, &path.into_inner(), TripStatus::Approved, "Trip approved")
}

/// Reject trip
#[utoipa::path(
    put,
    path = "/api/trips/{trip_id}/reject",
    params(
        ("trip_id", Path, description = "ID of the trip to reject")
    ),
    responses(
        (status = 200, description = "Trip rejected", body = Object, example = json!({
            "message": "Trip rejected"
        })),
        (status = 400, description = "Trip not found or already processed", body = Object, example = json!({
            "message": "Trip not found or already processed"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reject_trip(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    set_status(state, &path.into_inner(), TripStatus::Rejected, "Trip rejected")
}

fn set_status(
    state: web::Data<AppState>,
    trip_id: &str,
    status: TripStatus,
    message: &str,
) -> HttpResponse {
    match state.set_trip_status(trip_id, status) {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": message })),
        Ok(false) => HttpResponse::BadRequest().json(json!({
            "message": "Trip not found or already processed"
        })),
        Err(e) => {
            error!(error = %e, trip_id, "Failed to update trip status");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// Suggest purpose and category for a route
#[utoipa::path(
    post,
    path = "/api/trips/suggest",
    request_body = SuggestTripReq,
    responses(
        (status = 200, description = "Suggestion (or null when unavailable)", body = SuggestTripResponse),
        (status = 400, description = "Missing pickup or dropoff", body = Object, example = json!({
            "message": "Please enter pickup and dropoff locations first"
        }))
    ),
    tag = "Trips",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn suggest_trip(
    assist: web::Data<AssistClient>,
    payload: web::Json<SuggestTripReq>,
) -> impl Responder {
    let pickup = payload.pickup.trim();
    let dropoff = payload.dropoff.trim();

    // Validated here so an empty route never reaches the network.
    if pickup.is_empty() || dropoff.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Please enter pickup and dropoff locations first"
        }));
    }

    let suggestion = assist.suggest_trip_details(pickup, dropoff).await;
    HttpResponse::Ok().json(SuggestTripResponse { suggestion })
}
