//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/user/register`, `POST /api/user/login`, `POST /api/user/logout`
/// - `GET /api/user`, `PUT /api/user/password`, `POST /api/user/delete`, `GET /api/user/export`
/// - `POST /api/geocache`, `GET /api/geocache`
/// - `POST /api/checkin`, `GET /api/checkin`, `GET /api/checkin/paginated`
/// - `GET /api/checkin/{id}`, `PUT /api/checkin/{id}`
/// - `POST /api/image`, `GET /api/image/{id}`
/// - `GET /api/stats`, `GET /api/stats/global`
///
/// The OpenAPI specification is served at `/api/docs/openapi.json` and Swagger UI at
/// `/api/docs`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "offpath", description = "offpath geocaching API"), tags(
        (name = controller::user::USER_TAG, description = "Account API routes"),
        (name = controller::geocache::GEOCACHE_TAG, description = "Geocache API routes"),
        (name = controller::checkin::CHECKIN_TAG, description = "Check-in API routes"),
        (name = controller::image::IMAGE_TAG, description = "Image upload API routes"),
        (name = controller::stats::STATS_TAG, description = "Stats API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::user::register))
        .routes(routes!(controller::user::login))
        .routes(routes!(controller::user::logout))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(controller::user::change_password))
        .routes(routes!(controller::user::delete_account))
        .routes(routes!(controller::user::export))
        .routes(routes!(
            controller::geocache::request_geocache,
            controller::geocache::get_active_geocache
        ))
        .routes(routes!(
            controller::checkin::create_checkin,
            controller::checkin::list_checkins
        ))
        .routes(routes!(controller::checkin::list_checkins_paginated))
        .routes(routes!(
            controller::checkin::get_checkin,
            controller::checkin::update_checkin
        ))
        .routes(routes!(controller::image::upload_image))
        .routes(routes!(controller::image::get_image))
        .routes(routes!(controller::stats::get_stats))
        .routes(routes!(controller::stats::get_global_stats))
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(DefaultBodyLimit::max(controller::image::MAX_UPLOAD_BYTES))
}
