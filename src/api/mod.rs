// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_bearer,
    config::REQUEST_TIMEOUT,
    error::ErrorBody,
    state::AppState,
    toxiproxy::{Proxy, ProxyMap, Toxic},
};

pub mod json;
pub mod login;
pub mod proxies;

/// Build the full application router.
///
/// - `/dashboard/*` serves static files, no auth
/// - `/api/login` issues tokens, no auth
/// - `/api/toxiproxy/*` requires a bearer token
pub fn router(state: AppState) -> Router {
    let toxiproxy_routes = Router::new()
        .route("/proxies", get(proxies::list_proxies))
        .route("/proxies/{proxy_name}", get(proxies::get_proxy))
        .route(
            "/proxies/{proxy_name}/toxics",
            get(proxies::list_toxics).post(proxies::create_toxic),
        )
        .route(
            "/proxies/{proxy_name}/toxics/{toxic_name}",
            delete(proxies::delete_toxic),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let api_routes = Router::new()
        .route("/login", post(login::login))
        .nest("/toxiproxy", toxiproxy_routes);

    let dashboard = ServeDir::new(&state.dashboard_dir);

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .nest_service("/dashboard", dashboard)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        proxies::list_proxies,
        proxies::get_proxy,
        proxies::list_toxics,
        proxies::create_toxic,
        proxies::delete_toxic
    ),
    components(
        schemas(
            login::LoginRequest,
            login::LoginResponse,
            Proxy,
            ProxyMap,
            Toxic,
            ErrorBody
        )
    ),
    tags(
        (name = "Auth", description = "Token login"),
        (name = "Toxiproxy", description = "Proxy and toxic management")
    )
)]
struct ApiDoc;
