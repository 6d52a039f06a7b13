use crate::core::error::AppError;
use crate::features::auth::JwtValidator;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Basic auth in front of the Swagger UI; `credentials` is `user:password`
pub async fn basic_auth_middleware(
    State(credentials): State<Arc<String>>,
    req: Request,
    next: Next,
) -> Response {
    let supplied = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok());

    if supplied.as_deref() == Some(credentials.as_str()) {
        return next.run(req).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
        "Unauthorized",
    )
        .into_response()
}

pub async fn auth_middleware(
    State(validator): State<Arc<JwtValidator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    // Validate Bearer format
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    // Validate token
    let user = validator.validate_token(token).await?;

    // Insert authenticated user into request extensions
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::JwksClient;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;
    use std::time::Duration;

    fn protected() -> Router {
        let jwks = Arc::new(JwksClient::new(
            "https://issuer.invalid",
            Duration::from_secs(60),
        ));
        let validator = Arc::new(JwtValidator::new(
            jwks,
            "https://issuer.invalid".to_string(),
            "portal".to_string(),
            "https://institute.local/claims".to_string(),
            Duration::from_secs(0),
        ));

        Router::new()
            .route("/private", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(validator, auth_middleware))
    }

    #[tokio::test]
    async fn test_missing_bearer_is_unauthorized() {
        let server = TestServer::new(protected()).unwrap();

        server
            .get("/private")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .get("/private")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_token_is_unauthorized() {
        let server = TestServer::new(protected()).unwrap();

        server
            .get("/private")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_swagger_basic_auth() {
        let app = Router::new()
            .route("/docs", get(|| async { "docs" }))
            .layer(from_fn_with_state(
                Arc::new("admin:secret".to_string()),
                basic_auth_middleware,
            ));
        let server = TestServer::new(app).unwrap();

        server
            .get("/docs")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        // "admin:secret"
        server
            .get("/docs")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic YWRtaW46c2VjcmV0"))
            .await
            .assert_status_ok();
    }

    #[test]
    fn test_request_ids_are_generated() {
        let request = axum::http::Request::new(());
        assert!(MakeRequestUuid.make_request_id(&request).is_some());
    }
}
