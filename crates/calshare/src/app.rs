use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        calendars::{
            create_calendar, delete_calendar, get_calendar, list_calendars, list_events,
            update_calendar,
        },
        events::{create_event, delete_event, get_event, update_event},
        health::livez,
        login::login,
        sharings::{create_sharing, delete_sharing, list_sharings, update_sharing},
        users::{delete_user, get_me, register, update_me},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("sharing_code"),
        ]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/login", post(login))
        // User routes
        .route("/users", post(register))
        .route("/users/me", get(get_me).put(update_me))
        .route("/users/{id}", delete(delete_user))
        // Calendar routes
        .route("/calendars", get(list_calendars).post(create_calendar))
        .route(
            "/calendars/{id}",
            get(get_calendar)
                .put(update_calendar)
                .delete(delete_calendar),
        )
        .route("/calendars/{id}/events", get(list_events))
        // Event routes
        .route("/events", post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        // Sharing routes
        .route("/sharings", get(list_sharings).post(create_sharing))
        .route("/sharings/{id}", put(update_sharing).delete(delete_sharing))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}
