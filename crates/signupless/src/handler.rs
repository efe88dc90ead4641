//! Per-request handlers.
//!
//! Each request runs in its own Tokio task. The flow for both endpoints is:
//!   1. Extract the input (JSON body or `session-token` header)
//!   2. Call the session service
//!   3. Encode the record as JSON, or let `SignuplessError` render the failure
//!
//! Panics are not handled here. `CatchPanicLayer` (see `server.rs`) turns
//! them into a 500 through [`panic_response`].

use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use signupless_protocol::{
    AddSessionRequest, Codec, ProtocolError, SESSION_TOKEN_HEADER, SessionResponse,
};
use signupless_token::Clock;

use crate::SignuplessError;
use crate::server::ServerState;

/// `POST /session/add`: registers an identity and issues its first token.
///
/// The body is decoded whatever its `Content-Type`.
pub(crate) async fn add_session<C: Clock>(
    State(state): State<Arc<ServerState<C>>>,
    body: Bytes,
) -> Result<Response, SignuplessError> {
    let request: AddSessionRequest = state.codec.decode(&body)?;
    let record = state.sessions.add_session(request.id).await?;
    Ok(encode(&state.codec, &SessionResponse::from(record))?)
}

/// `POST /session/check`: validates the `session-token` header and
/// rotates it.
///
/// A missing header, or one that isn't valid UTF-8, is treated as the empty
/// string and fails the format check like any other malformed token.
pub(crate) async fn check_session<C: Clock>(
    State(state): State<Arc<ServerState<C>>>,
    headers: HeaderMap,
) -> Result<Response, SignuplessError> {
    let presented = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let record = state.sessions.check_session(presented).await?;
    Ok(encode(&state.codec, &SessionResponse::from(record))?)
}

/// Encodes `value` as a 200 response with the codec's content type.
fn encode<C: Codec, T: Serialize>(codec: &C, value: &T) -> Result<Response, ProtocolError> {
    let bytes = codec.encode(value)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, C::CONTENT_TYPE)],
        bytes,
    )
        .into_response())
}

/// Converts a caught panic into a 500 response.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    SignuplessError::Panic(detail).into_response()
}

#[cfg(test)]
mod tests {
    //! In-process handler tests: requests go straight into the router with
    //! `oneshot`, no socket involved.

    use std::sync::atomic::{AtomicI64, Ordering};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use signupless_protocol::{ErrorResponse, Identity, JsonCodec};
    use signupless_session::{RotationPolicy, SessionConfig, SessionService};
    use signupless_token::{Salt, derive, validate_format};
    use tower::ServiceExt;

    use super::*;
    use crate::server::router;

    const SALT: &str = "174baa8db2b92718a0099507b18702f7a1c1a3c3397e5b0b";

    struct StepClock(AtomicI64);

    impl Clock for StepClock {
        fn now_nanos(&self) -> i64 {
            self.0.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    fn state(rotation: RotationPolicy) -> Arc<ServerState<StepClock>> {
        Arc::new(ServerState {
            sessions: SessionService::with_clock(
                Salt::from_string(SALT),
                StepClock(AtomicI64::new(0)),
                SessionConfig { rotation },
            ),
            codec: JsonCodec,
        })
    }

    fn app() -> Router {
        router(state(RotationPolicy::Retain))
    }

    fn add_request(body: &'static str) -> Request<Body> {
        Request::post("/session/add").body(Body::from(body)).unwrap()
    }

    fn check_request(token: &str) -> Request<Body> {
        Request::post("/session/check")
            .header(SESSION_TOKEN_HEADER, token)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    async fn session(response: Response) -> SessionResponse {
        serde_json::from_slice(&body_bytes(response).await).expect("session body")
    }

    async fn error(response: Response) -> ErrorResponse {
        serde_json::from_slice(&body_bytes(response).await).expect("error body")
    }

    // =====================================================================
    // /session/add
    // =====================================================================

    #[tokio::test]
    async fn test_add_returns_id_and_token() {
        let response = app()
            .oneshot(add_request(r#"{"id": "1234567890"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = session(response).await;
        assert_eq!(body.id, Identity::new("1234567890"));
        assert_eq!(body.token.as_str().len(), 64);
        assert!(validate_format(body.token.as_str()));
    }

    #[tokio::test]
    async fn test_add_token_matches_salt_and_clock() {
        let response = app()
            .oneshot(add_request(r#"{"id": "alice"}"#))
            .await
            .unwrap();

        assert_eq!(session(response).await.token, derive(SALT, 1));
    }

    #[tokio::test]
    async fn test_add_malformed_json_returns_400() {
        let response = app()
            .oneshot(add_request(r#"{"id": "#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error(response).await.error.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_add_missing_id_returns_400() {
        let response = app().oneshot(add_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_empty_id_returns_400() {
        let response = app()
            .oneshot(add_request(r#"{"id": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error(response).await.error.message,
            "identity must not be empty"
        );
    }

    #[tokio::test]
    async fn test_add_get_method_not_allowed() {
        let response = app()
            .oneshot(Request::get("/session/add").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // =====================================================================
    // /session/check
    // =====================================================================

    #[tokio::test]
    async fn test_check_fresh_token_rotates() {
        let app = app();
        let added = session(
            app.clone()
                .oneshot(add_request(r#"{"id": "1234567890"}"#))
                .await
                .unwrap(),
        )
        .await;

        let response = app
            .oneshot(check_request(added.token.as_str()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let checked = session(response).await;
        assert_eq!(checked.id, added.id);
        assert_ne!(checked.token, added.token);
    }

    #[tokio::test]
    async fn test_check_get_and_head_rejected_without_rotating() {
        for rotation in [RotationPolicy::Retain, RotationPolicy::Invalidate] {
            let shared = state(rotation);
            let app = router(Arc::clone(&shared));
            let added = session(
                app.clone()
                    .oneshot(add_request(r#"{"id": "alice"}"#))
                    .await
                    .unwrap(),
            )
            .await;

            for method in [Method::GET, Method::HEAD] {
                let request = Request::builder()
                    .method(method.clone())
                    .uri("/session/check")
                    .header(SESSION_TOKEN_HEADER, added.token.as_str())
                    .body(Body::empty())
                    .unwrap();
                let response = app.clone().oneshot(request).await.unwrap();

                assert_eq!(
                    response.status(),
                    StatusCode::METHOD_NOT_ALLOWED,
                    "{method} under {rotation:?}"
                );
            }

            // Nothing minted, nothing consumed.
            assert_eq!(shared.sessions.store().len().await, 1);
            let checked = session(
                app.oneshot(check_request(added.token.as_str()))
                    .await
                    .unwrap(),
            )
            .await;
            assert_eq!(checked.id, added.id);
        }
    }

    #[tokio::test]
    async fn test_check_malformed_token_returns_400() {
        let response = app()
            .oneshot(check_request(
                "a3a3f8c5b78fd9135c5e5b5e14b1d9b1fd11b7a3d3a8f5cdd0f72c492fd05019#",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_missing_header_returns_400() {
        let request = Request::post("/session/check")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_unknown_token_returns_403_without_detail() {
        let response = app()
            .oneshot(check_request(
                "a3a3f8c5b78fd9135c5e5b5e14b1d9b1fd11b7a3d3a8f5cdd0f72c492fd05019",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = error(response).await;
        assert_eq!(body.error.code, "FORBIDDEN");
        assert_eq!(body.error.message, "forbidden");
    }

    // =====================================================================
    // panic_response()
    // =====================================================================

    #[tokio::test]
    async fn test_panic_response_hides_payload() {
        let response = panic_response(Box::new("database password is hunter2"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = error(response).await;
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("hunter2"));
    }
}
