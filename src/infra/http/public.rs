use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use metrics::counter;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    application::{
        admin::{posts::ADMIN_POSTS_PATH, sessions::AdminSessions},
        error::{ErrorReport, HttpError},
        posts::{PostError, PostService},
    },
    infra::telemetry::ADMIN_AUTH_FAILURES_TOTAL,
    presentation::views::{
        LayoutContext, LoginTemplate, LoginView, PageMetaView, PostDetailTemplate,
        PostDetailView, PostListTemplate, PostListView, render_error_response,
        render_template_response,
    },
};

use super::{ADMIN_COOKIE, admin_credential, db_health_response, repo_error_to_http, wants_json};

const PUBLIC_POSTS_PATH: &str = "/posts";
const INVALID_TOKEN: &str = "That admin token is not valid.";

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub sessions: Arc<dyn AdminSessions>,
}

pub fn build_public_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/posts", get(posts_index))
        .route("/posts/{slug}", get(post_detail))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", post(logout))
        .route("/_health/db", get(public_health))
        .with_state(state)
}

async fn root_redirect() -> Redirect {
    Redirect::to(PUBLIC_POSTS_PATH)
}

async fn posts_index(State(state): State<HttpState>, headers: HeaderMap) -> Response {
    let credential = admin_credential(&headers);
    let show_admin_link = state
        .sessions
        .optional_admin_user(credential.as_deref())
        .await
        .is_some();

    let posts = match state.posts.list_summaries().await {
        Ok(posts) => posts,
        Err(err) => return post_error_response("infra::http::public::posts_index", err, false),
    };

    if wants_json(&headers) {
        return Json(json!({ "posts": posts })).into_response();
    }

    let view = LayoutContext::new(
        PageMetaView::titled("Posts"),
        PostListView {
            posts,
            show_admin_link,
        },
    );
    render_template_response(PostListTemplate { view }, StatusCode::OK)
}

async fn post_detail(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let json = wants_json(&headers);
    let detail = match state.posts.load_post(&slug).await {
        Ok(detail) => detail,
        Err(err) => return post_error_response("infra::http::public::post_detail", err, json),
    };

    if json {
        return Json(json!({
            "post": {
                "slug": detail.post.slug,
                "title": detail.post.title,
                "markdown": detail.post.markdown,
                "html": detail.html,
            }
        }))
        .into_response();
    }

    let view = LayoutContext::new(
        PageMetaView::titled(detail.post.title.clone()),
        PostDetailView {
            slug: detail.post.slug,
            title: detail.post.title,
            body_html: detail.html,
        },
    );
    render_template_response(PostDetailTemplate { view }, StatusCode::OK)
}

fn post_error_response(source: &'static str, err: PostError, json: bool) -> Response {
    match err {
        PostError::NotFound(not_found) => {
            let message = not_found.to_string();
            if json {
                let mut response =
                    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response();
                ErrorReport::from_error(source, StatusCode::NOT_FOUND, &not_found)
                    .attach(&mut response);
                response
            } else {
                render_error_response(source, StatusCode::NOT_FOUND, message)
            }
        }
        PostError::Repo(repo) => repo_error_to_http(source, repo).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginForm {
    token: Option<String>,
}

async fn login_form() -> Response {
    login_page(None, StatusCode::OK)
}

async fn login_submit(State(state): State<HttpState>, Form(form): Form<LoginForm>) -> Response {
    const SOURCE: &str = "infra::http::public::login_submit";

    let identity = match state
        .sessions
        .require_admin_user(form.token.as_deref())
        .await
    {
        Ok(identity) => identity,
        Err(err) => {
            counter!(ADMIN_AUTH_FAILURES_TOTAL, "reason" => err.reason()).increment(1);
            let mut response = login_page(Some(INVALID_TOKEN), StatusCode::UNAUTHORIZED);
            ErrorReport::from_error(SOURCE, StatusCode::UNAUTHORIZED, &err).attach(&mut response);
            return response;
        }
    };

    let token = form.token.unwrap_or_default();
    let cookie = match HeaderValue::from_str(&format!(
        "{ADMIN_COOKIE}={}; HttpOnly; SameSite=Lax; Path=/",
        token.trim()
    )) {
        Ok(cookie) => cookie,
        Err(err) => {
            return HttpError::from_error(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to start admin session",
                &err,
            )
            .into_response();
        }
    };

    info!(
        target = "blogdesk::http::session",
        actor = identity.name(),
        "admin signed in"
    );
    ([(SET_COOKIE, cookie)], Redirect::to(ADMIN_POSTS_PATH)).into_response()
}

async fn logout() -> Response {
    let cleared =
        HeaderValue::from_static("blogdesk_admin=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    ([(SET_COOKIE, cleared)], Redirect::to(PUBLIC_POSTS_PATH)).into_response()
}

fn login_page(error: Option<&'static str>, status: StatusCode) -> Response {
    let view = LayoutContext::new(PageMetaView::titled("Sign in"), LoginView { error });
    render_template_response(LoginTemplate { view }, status)
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.posts.health_check().await)
}
