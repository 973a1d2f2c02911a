use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::{
    application::{admin::posts::AdminPostError, error::ErrorReport},
    domain::error::DomainError,
    infra::http::repo_error_to_http,
    presentation::views::render_error_response,
};

pub(super) fn admin_post_error(source: &'static str, err: AdminPostError, json: bool) -> Response {
    match err {
        AdminPostError::Domain(domain @ DomainError::NotFound { .. }) => {
            let message = domain.to_string();
            if json {
                let mut response =
                    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response();
                ErrorReport::from_error(source, StatusCode::NOT_FOUND, &domain)
                    .attach(&mut response);
                response
            } else {
                render_error_response(source, StatusCode::NOT_FOUND, message)
            }
        }
        AdminPostError::Domain(domain @ DomainError::Invariant { .. }) => {
            error!(
                target = "blogdesk::admin::posts",
                source = source,
                error = %domain,
                "admin post contract violated"
            );
            let mut response = render_error_response(
                source,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            );
            ErrorReport::from_error(source, StatusCode::INTERNAL_SERVER_ERROR, &domain)
                .attach(&mut response);
            response
        }
        AdminPostError::Repo(repo) => repo_error_to_http(source, repo).into_response(),
    }
}
