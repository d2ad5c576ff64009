//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::discovery::{ConfigError, Discovery, DiscoveryError};
use crate::domain::GeoPoint;
use crate::location::{GeolocationOptions, LocationError, LocationReport};
use crate::osrm::RouteError;

use super::dto::*;
use super::navigate::directions_url;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/search", post(search_stations))
        .route("/api/stations", get(list_stations))
        .route("/api/config", get(get_config).put(update_config))
        .route("/api/location", get(recenter))
        .route(
            "/api/route",
            get(current_route).post(show_route).delete(clear_route),
        )
        .route("/api/navigate", get(navigate))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let config = ConfigResponse::from_config(&state.session.config().await);
    Html(
        IndexTemplate::new(GeolocationOptions::default(), &config)
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

fn results_response(response: ResultsResponse, headers: &HeaderMap) -> Result<Response, AppError> {
    if accepts_html(headers) {
        render(&StationListTemplate::from_response(response))
    } else {
        Ok(Json(response).into_response())
    }
}

/// Search around the position the browser reported.
///
/// A failed search clears the previous results. A search overtaken by a
/// newer one neither replaces nor clears them and answers 409.
async fn search_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(report): Json<LocationReport>,
) -> Result<Response, AppError> {
    let origin = report.resolve()?;
    state.session.record_location(origin).await;

    let ticket = state.session.begin_search().await;
    let config = state.session.config().await;
    let discovery = Discovery::new(state.overpass.as_ref(), state.osrm.as_ref(), &config);

    let outcome = match discovery.find(origin).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if !state.session.clear_results(ticket).await {
                return Err(AppError::Superseded);
            }
            return Err(e.into());
        }
    };

    info!(
        origin = %origin,
        stations = outcome.stations.len(),
        status = ?outcome.status,
        "Search complete"
    );

    let results = state
        .session
        .replace_results(ticket, outcome)
        .await
        .ok_or(AppError::Superseded)?;
    let sort = state.session.sort_order().await;
    results_response(ResultsResponse::from_results(&results, sort), &headers)
}

/// Current results, optionally re-sorted.
async fn list_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StationListQuery>,
) -> Result<Response, AppError> {
    let results = match query.sort {
        Some(order) => state.session.set_sort_order(order).await,
        None => state.session.results().await,
    };
    let results = results.ok_or_else(|| AppError::NotFound {
        message: "No search results yet".to_string(),
    })?;

    let sort = state.session.sort_order().await;
    results_response(ResultsResponse::from_results(&results, sort), &headers)
}

async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from_config(&state.session.config().await))
}

/// Change radius and/or station limit. Applies to the next search.
async fn update_config(
    State(state): State<AppState>,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<ConfigResponse>, AppError> {
    let radius_m = req
        .radius_m()
        .map_err(|message| AppError::BadRequest { message })?;

    let config = state
        .session
        .update_config(radius_m, req.max_stations)
        .await?;

    Ok(Json(ConfigResponse::from_config(&config)))
}

/// Last known location, for recentring the map.
async fn recenter(State(state): State<AppState>) -> Result<Json<LocationResponse>, AppError> {
    let location = state
        .session
        .last_location()
        .await
        .ok_or_else(|| AppError::NotFound {
            message: "Location not yet known".to_string(),
        })?;

    Ok(Json(LocationResponse::from_point(location)))
}

/// Fetch and display a route from the last location to a destination.
///
/// Any displayed route is cleared first. If another route request is made
/// while this one is in flight, this response is discarded.
async fn show_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RouteRequest>,
) -> Result<Response, AppError> {
    let destination = GeoPoint::new(req.latitude, req.longitude).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let origin = state
        .session
        .last_location()
        .await
        .ok_or(AppError::Location(LocationError::PositionUnavailable))?;

    let ticket = state.session.begin_route().await;
    let route = match state.osrm.full_route(origin, destination).await {
        Ok(route) => route,
        Err(e) => {
            // A failure that arrives after a newer request is just as stale.
            if !state.session.is_current(ticket).await {
                return Err(AppError::Superseded);
            }
            return Err(e.into());
        }
    };

    let response = RouteResponse::from_route(&route);
    if !state.session.finish_route(ticket, route).await {
        return Err(AppError::Superseded);
    }

    route_response(response, &headers)
}

/// The route currently on display.
async fn current_route(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let route = state
        .session
        .active_route()
        .await
        .ok_or_else(|| AppError::NotFound {
            message: "No route on display".to_string(),
        })?;

    route_response(RouteResponse::from_route(&route), &headers)
}

fn route_response(response: RouteResponse, headers: &HeaderMap) -> Result<Response, AppError> {
    if accepts_html(headers) {
        render(&RoutePanelTemplate::from_response(response))
    } else {
        Ok(Json(response).into_response())
    }
}

async fn clear_route(State(state): State<AppState>) -> StatusCode {
    state.session.clear_route().await;
    StatusCode::NO_CONTENT
}

/// External navigation link to a station.
async fn navigate(
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigateResponse>, AppError> {
    let destination = GeoPoint::new(query.lat, query.lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let origin = state.session.last_location().await;

    Ok(Json(NavigateResponse {
        url: directions_url(destination, origin),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Location(LocationError),
    Discovery(DiscoveryError),
    Route(RouteError),
    /// A newer search or route request replaced this one
    Superseded,
    Internal { message: String },
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        AppError::Location(e)
    }
}

impl From<DiscoveryError> for AppError {
    fn from(e: DiscoveryError) -> Self {
        match e {
            DiscoveryError::InvalidConfig(e) => e.into(),
            e => AppError::Discovery(e),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::Route(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Location(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Discovery(_) => StatusCode::BAD_GATEWAY,
            AppError::Route(RouteError::NoRouteFound) => StatusCode::NOT_FOUND,
            AppError::Route(_) => StatusCode::BAD_GATEWAY,
            AppError::Superseded => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the user.
    fn message(&self) -> String {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message.clone(),
            AppError::Location(e) => e.to_string(),
            AppError::Discovery(_) => "Failed to fetch fuel stations. Please try again.".to_string(),
            AppError::Route(RouteError::NoRouteFound) => "No route found.".to_string(),
            AppError::Route(_) => "Could not calculate route.".to_string(),
            AppError::Superseded => "Request superseded by a newer one.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            AppError::Discovery(e) => error!(%status, error = %e, "Station discovery failed"),
            AppError::Route(e) if e.is_service_side() => {
                error!(%status, error = %e, "Routing service failed")
            }
            AppError::Route(e) => warn!(%status, error = %e, "Route request failed"),
            AppError::Internal { .. } => error!(%status, %message, "Internal error"),
            _ => info!(%status, %message, "Request rejected"),
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
