use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

/// Returns the `OpenAPI` specification in YAML format.
pub async fn openapi_yaml() -> impl IntoResponse {
    let spec = include_str!("../../openapi.yaml");
    let version = env!("CARGO_PKG_VERSION");
    let spec_with_version = spec.replace("version: 0.0.0", &format!("version: {version}"));

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/yaml")], spec_with_version)
}
