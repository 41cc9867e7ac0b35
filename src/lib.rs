use std::sync::Arc;

use poem::{
    Endpoint, EndpointExt, IntoResponse, Route,
    http::StatusCode,
    middleware::{AddData, Cors},
};
use poem_openapi::{
    OpenApiService,
    error::{ContentTypeError, ParseRequestPayloadError},
    payload::Json,
};

use crate::core::engine::ReportEngine;
use crate::routes::report::ApiReport;
use crate::schemas::common::ReportResponse;
use crate::settings::Config;

pub mod core;
pub mod routes;
pub mod schemas;
pub mod settings;

pub struct AppState {
    pub engine: Arc<ReportEngine>,
    pub config: Config,
}

pub fn init_openapi_route(app_state: Arc<AppState>) -> impl Endpoint {
    let prefix = app_state.config.api_prefix();
    let openapi_route =
        OpenApiService::new(ApiReport, "Report Engine API", env!("CARGO_PKG_VERSION"))
            .description(
                "Generates report designs and outputs from declarative configuration. \
                 Supports pdf, html, xls, xlsx, doc, docx, ppt, pptx and xml.",
            )
            .server(prefix.clone());

    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .catch_error(|err: ParseRequestPayloadError| async move {
            tracing::warn!("Malformed request payload: {}", err);
            Json(ReportResponse::error("Invalid request payload", &err.to_string()))
                .with_status(StatusCode::BAD_REQUEST)
        })
        .catch_error(|err: ContentTypeError| async move {
            tracing::warn!("Unsupported request content type: {}", err);
            Json(ReportResponse::error("Invalid request payload", &err.to_string()))
                .with_status(StatusCode::BAD_REQUEST)
        })
        .with(AddData::new(app_state))
        .with(Cors::new())
}
