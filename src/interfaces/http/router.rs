//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BarbershopService, BookingService, CatalogService, UserService};
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    appointments, auth, barbershops, health, metrics, request_id, services, users,
};

/// State shared by every route; each handler pulls its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub user_service: Arc<UserService>,
    pub barbershop_service: Arc<BarbershopService>,
    pub catalog_service: Arc<CatalogService>,
    pub booking_service: Arc<BookingService>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
    pub prometheus: PrometheusHandle,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for barbershops::BarbershopHandlerState {
    fn from_ref(s: &AppState) -> Self {
        barbershops::BarbershopHandlerState {
            barbershop_service: Arc::clone(&s.barbershop_service),
        }
    }
}

impl FromRef<AppState> for services::ServiceHandlerState {
    fn from_ref(s: &AppState) -> Self {
        services::ServiceHandlerState {
            catalog_service: Arc::clone(&s.catalog_service),
        }
    }
}

impl FromRef<AppState> for appointments::AppointmentHandlerState {
    fn from_ref(s: &AppState) -> Self {
        appointments::AppointmentHandlerState {
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for metrics::MetricsState {
    fn from_ref(s: &AppState) -> Self {
        metrics::MetricsState {
            handle: s.prometheus.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
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
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        auth::request_password_reset,
        auth::confirm_password_reset,
        // Users
        users::list_users,
        users::get_user,
        users::update_me,
        users::delete_me,
        // Barbershops
        barbershops::list_barbershops,
        barbershops::search_barbershops,
        barbershops::get_barbershop,
        barbershops::get_own_barbershop,
        barbershops::create_barbershop,
        barbershops::update_barbershop,
        barbershops::delete_barbershop,
        // Services
        services::list_barbershop_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        // Appointments
        appointments::create_appointment,
        appointments::list_client_appointments,
        appointments::list_owner_appointments,
        appointments::list_barbershop_day,
        appointments::delete_appointment,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::ChangePasswordRequest,
            auth::PasswordResetRequest,
            auth::PasswordResetConfirmRequest,
            users::UserDto,
            users::PhotoDto,
            users::UpdateUserRequest,
            barbershops::BarbershopDto,
            barbershops::BarbershopDetailsDto,
            barbershops::CreateBarbershopRequest,
            barbershops::UpdateBarbershopRequest,
            services::ServiceDto,
            services::ServiceRequest,
            appointments::AppointmentDto,
            appointments::AppointmentDetailsDto,
            appointments::CreateAppointmentRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Registration, login, password change and recovery"),
        (name = "Users", description = "User lookup and self-service profile"),
        (name = "Barbershops", description = "Public listing and owner management of barbershops"),
        (name = "Services", description = "Service catalog of each barbershop"),
        (name = "Appointments", description = "Booking, listing and cancelling appointments"),
    ),
    info(
        title = "Barbershop Booking API",
        version = "1.0.0",
        description = "REST API for booking barbershop services",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/change-password", put(auth::change_password))
        .route("/auth/password-reset", post(auth::request_password_reset))
        .route(
            "/auth/password-reset/confirm",
            post(auth::confirm_password_reset),
        )
        // Users
        .route("/users", get(users::list_users))
        .route("/users/me", put(users::update_me).delete(users::delete_me))
        .route("/users/{id}", get(users::get_user))
        // Barbershops
        .route(
            "/barbershops",
            get(barbershops::list_barbershops)
                .post(barbershops::create_barbershop)
                .put(barbershops::update_barbershop)
                .delete(barbershops::delete_barbershop),
        )
        .route("/barbershops/search", get(barbershops::search_barbershops))
        .route("/barbershops/mine", get(barbershops::get_own_barbershop))
        .route("/barbershops/{id}", get(barbershops::get_barbershop))
        .route(
            "/barbershops/{id}/services",
            get(services::list_barbershop_services),
        )
        .route(
            "/barbershops/{id}/appointments",
            get(appointments::list_barbershop_day),
        )
        // Services
        .route("/services", post(services::create_service))
        .route(
            "/services/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        // Appointments
        .route("/appointments", post(appointments::create_appointment))
        .route(
            "/appointments/client",
            get(appointments::list_client_appointments),
        )
        .route(
            "/appointments/barbershop",
            get(appointments::list_owner_appointments),
        )
        .route("/appointments/{id}", delete(appointments::delete_appointment))
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = api_routes().layer(middleware::from_fn_with_state(
        state.auth.clone(),
        auth_middleware,
    ));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
