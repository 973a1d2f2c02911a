use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use metrics::counter;

use crate::{
    application::{admin::sessions::AdminAuthError, error::HttpError},
    infra::{http::admin_credential, telemetry::ADMIN_AUTH_FAILURES_TOTAL},
};

use super::AdminState;

const LOGIN_PATH: &str = "/login";

/// Resolves the admin identity or short-circuits: page loads go to the login
/// form, everything else is refused with 401.
pub(super) async fn require_admin(
    State(state): State<AdminState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let credential = admin_credential(request.headers());

    let identity = match state
        .sessions
        .require_admin_user(credential.as_deref())
        .await
    {
        Ok(identity) => identity,
        Err(err) => return deny(request.method(), err),
    };

    request.extensions_mut().insert(identity.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(identity);
    response
}

fn deny(method: &Method, err: AdminAuthError) -> Response {
    counter!(ADMIN_AUTH_FAILURES_TOTAL, "reason" => err.reason()).increment(1);

    if method == Method::GET || method == Method::HEAD {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    HttpError::from_error(
        "infra::http::admin::require_admin",
        StatusCode::UNAUTHORIZED,
        "Admin sign-in required",
        &err,
    )
    .into_response()
}
