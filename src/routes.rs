use crate::{
    api::{dashboard, employee, settings, trip},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(Governor::new(&protected_limiter)) // rate limiting
            .service(handlers::me)
            .service(
                web::scope("/trips")
                    // /trips
                    .service(
                        web::resource("")
                            .route(web::post().to(trip::create_trip))
                            .route(web::get().to(trip::list_trips)),
                    )
                    // /trips/suggest — registered before /{id} so the
                    // literal segment wins
                    .service(
                        web::resource("/suggest").route(web::post().to(trip::suggest_trip)),
                    )
                    // /trips/{id}
                    .service(web::resource("/{id}").route(web::get().to(trip::get_trip)))
                    // /trips/{id}/approve
                    .service(
                        web::resource("/{id}/approve").route(web::put().to(trip::approve_trip)),
                    )
                    // /trips/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(trip::reject_trip)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(
                        web::resource("/stats").route(web::get().to(dashboard::get_stats)),
                    )
                    .service(
                        web::resource("/insights")
                            .route(web::post().to(dashboard::generate_insights)),
                    ),
            )
            .service(
                web::scope("/settings").service(
                    web::resource("")
                        .route(web::get().to(settings::get_settings))
                        .route(web::put().to(settings::update_settings)),
                ),
            ),
    );
}

// LOGIN
//  ├─ access_token (24 h)
//  └─ session profile saved under tm_user
//
// API REQUEST
//  └─ Authorization: Bearer access_token
