use crate::{
    auth::{auth::AuthUser, jwt::generate_access_token},
    config::Config,
    model::user::User,
    models::LoginReqDto,
    state::AppState,
};
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use tracing::{error, instrument};

// Stub authentication, not a security model: any non-empty credentials
// produce the fabricated manager session. There is no account store and
// no password verification.

const SESSION_USER_ID: &str = "admin-1";
const SESSION_USER_NAME: &str = "Alex Thompson";
const SESSION_USER_ROLE: &str = "Corporate Manager";
const SESSION_USER_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop";

/// Sign in
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Session created", body = Object, example = json!({
            "access_token": "eyJhbGciOiJIUzI1NiJ9...",
            "user": {
                "id": "admin-1",
                "name": "Alex Thompson",
                "email": "admin@taximanager.com",
                "role": "Corporate Manager"
            }
        })),
        (status = 400, description = "Empty email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(state, config, payload), fields(email = %payload.email))]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    state: web::Data<AppState>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = payload.email.trim();

    if email.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Email and password must not be empty"
        }));
    }

    let user = User {
        id: SESSION_USER_ID.to_string(),
        name: SESSION_USER_NAME.to_string(),
        email: email.to_string(),
        role: SESSION_USER_ROLE.to_string(),
        avatar: Some(SESSION_USER_AVATAR.to_string()),
    };

    if let Err(e) = state.set_session_user(&user) {
        error!(error = %e, "Failed to persist session user");
        return HttpResponse::InternalServerError().json(json!({
            "message": "Something went wrong, Contact with system admin"
        }));
    }

    let access_token = generate_access_token(
        user.id.clone(),
        user.email.clone(),
        user.name.clone(),
        user.role.clone(),
        &config.jwt_secret,
        config.session_ttl,
    );

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "user": user
    }))
}

/// Sign out
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = Object, example = json!({
            "message": "Signed out"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = state.clear_session_user() {
        error!(error = %e, "Failed to clear session user");
        return HttpResponse::InternalServerError().json(json!({
            "message": "Something went wrong, Contact with system admin"
        }));
    }

    HttpResponse::Ok().json(json!({
        "message": "Signed out"
    }))
}

/// Current session profile
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Profile from the bearer token", body = Object, example = json!({
            "id": "admin-1",
            "name": "Alex Thompson",
            "email": "admin@taximanager.com",
            "role": "Corporate Manager"
        })),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth",
    security(
        ("bearer_auth" = [])
    )
)]
#[get("/me")]
pub async fn me(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "id": auth.user_id,
        "name": auth.name,
        "email": auth.email,
        "role": auth.role
    }))
}
