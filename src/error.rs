use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// One failing field from registration validation.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("user already exists")]
    UserExists,
    #[error("missing credentials")]
    MissingCredentials,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::UserExists => (
                StatusCode::CONFLICT,
                Json(json!({ "message": "User already exists!" })),
            )
                .into_response(),
            ApiError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "Please enter all the information").into_response()
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, message).into_response()
            }
            ApiError::Database(e) => {
                // Unique email violation from an insert that lost the race
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return ApiError::UserExists.into_response();
                    }
                }
                error!(error = %e, "database error");
                internal()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                internal()
            }
        }
    }
}

// The caller only ever sees the generic message; detail stays in the log.
fn internal() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn validation_reports_every_field() {
        let err = ApiError::Validation(vec![
            FieldError {
                field: "firstname",
                message: "First name is required",
            },
            FieldError {
                field: "password",
                message: "Password must be at least 6 characters",
            },
        ]);
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "firstname");
    }

    #[tokio::test]
    async fn user_exists_is_conflict() {
        let res = ApiError::UserExists.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(body["message"], "User already exists!");
    }

    #[tokio::test]
    async fn missing_credentials_is_plain_bad_request() {
        let res = ApiError::MissingCredentials.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(res).await, "Please enter all the information");
    }

    #[tokio::test]
    async fn unauthorized_carries_its_message() {
        let res = ApiError::Unauthorized("Password is incorrect").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(res).await, "Password is incorrect");
    }

    #[tokio::test]
    async fn internal_never_leaks_detail() {
        let res = ApiError::Internal(anyhow::anyhow!("pool exhausted on shard 7")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(res).await;
        assert!(body.contains("Internal server error"));
        assert!(!body.contains("shard"));
    }

    #[tokio::test]
    async fn database_error_is_generic_internal() {
        let res = ApiError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(body["message"], "Internal server error");
    }
}
