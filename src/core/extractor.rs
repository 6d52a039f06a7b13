//! Request extractors that report failures through [`AppError`], so a bad
//! body, path segment or query string gets the usual `ApiResponse` envelope
//! instead of axum's plain-text rejection.

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body
pub struct AppJson<T>(pub T);

/// Typed path parameters (ids, post dates)
pub struct AppPath<T>(pub T);

/// Typed query string
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_error)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_error)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::BadRequest(format!("Invalid query string: {}", e.body_text()))
            })?;
        Ok(Self(value))
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
        JsonRejection::MissingJsonContentType(err) => {
            format!("Missing JSON content type: {}", err)
        }
        _ => "Failed to parse JSON body".to_string(),
    };
    AppError::BadRequest(message)
}

fn path_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(err) => {
            AppError::BadRequest(format!("Invalid path parameter: {}", err.body_text()))
        }
        other => AppError::Internal(other.body_text()),
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Approval {
        approved: bool,
    }

    #[derive(Deserialize)]
    struct Paging {
        page: i64,
    }

    async fn by_id(AppPath(id): AppPath<Uuid>) -> String {
        id.to_string()
    }

    async fn paged(AppQuery(paging): AppQuery<Paging>) -> String {
        paging.page.to_string()
    }

    async fn approve(AppJson(body): AppJson<Approval>) -> String {
        body.approved.to_string()
    }

    fn router() -> Router {
        Router::new()
            .route("/items/{id}", get(by_id))
            .route("/items", get(paged))
            .route("/approve", post(approve))
    }

    #[tokio::test]
    async fn test_bad_path_parameter_uses_envelope() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/items/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        let id = Uuid::now_v7();
        server
            .get(&format!("/items/{}", id))
            .await
            .assert_text(id.to_string());
    }

    #[tokio::test]
    async fn test_bad_query_uses_envelope() {
        let server = TestServer::new(router()).unwrap();

        let response = server.get("/items?page=first").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        server.get("/items?page=2").await.assert_text("2");
    }

    #[tokio::test]
    async fn test_bad_json_uses_envelope() {
        let server = TestServer::new(router()).unwrap();

        let response = server.post("/approve").json(&json!({ "approved": "yes" })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);

        server
            .post("/approve")
            .json(&json!({ "approved": true }))
            .await
            .assert_text("true");
    }
}
