use axum::{
    Extension, Json,
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::{
    application::{
        admin::{
            posts::{PostEditor, PostMutationOutcome},
            sessions::AdminIdentity,
        },
        error::ErrorReport,
    },
    domain::posts::{PostFieldErrors, PostFields, PostRoute},
    infra::http::{admin::AdminState, wants_json},
    presentation::{
        admin::views::{
            AdminLayout, AdminPostEditTemplate, AdminPostEditorView, AdminPostListView,
            AdminPostsTemplate,
        },
        views::render_template_response,
    },
};

use super::{
    errors::admin_post_error,
    forms::AdminPostForm,
    response::{PostEnvelope, PostListEnvelope, PostPayload},
};

pub(crate) async fn admin_posts_index(
    State(state): State<AdminState>,
    Extension(admin): Extension<AdminIdentity>,
    headers: HeaderMap,
) -> Response {
    const SOURCE: &str = "infra::http::admin::posts::admin_posts_index";
    let json = wants_json(&headers);

    let posts = match state.posts.list_posts(&admin).await {
        Ok(posts) => posts,
        Err(err) => return admin_post_error(SOURCE, err, json),
    };

    if json {
        let envelope = PostListEnvelope {
            posts: posts.iter().map(PostPayload::from).collect(),
        };
        return Json(envelope).into_response();
    }

    let view = AdminLayout::new(
        "Manage posts",
        admin.name(),
        AdminPostListView::from_records(&posts),
    );
    render_template_response(AdminPostsTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_editor(
    State(state): State<AdminState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    const SOURCE: &str = "infra::http::admin::posts::admin_post_editor";
    let json = wants_json(&headers);

    let route = match PostRoute::from_segment(&segment) {
        Ok(route) => route,
        Err(err) => return admin_post_error(SOURCE, err.into(), json),
    };

    let editor = match state.posts.load_editor(&admin, &route).await {
        Ok(editor) => editor,
        Err(err) => return admin_post_error(SOURCE, err, json),
    };

    match (editor, json) {
        (PostEditor::Create, true) => Json(json!({})).into_response(),
        (PostEditor::Edit(post), true) => Json(PostEnvelope {
            post: PostPayload::from(&post),
        })
        .into_response(),
        (PostEditor::Create, false) => render_editor(
            &admin,
            "New post",
            AdminPostEditorView::create(),
            StatusCode::OK,
        ),
        (PostEditor::Edit(post), false) => render_editor(
            &admin,
            &post.title,
            AdminPostEditorView::edit(&post),
            StatusCode::OK,
        ),
    }
}

pub(crate) async fn admin_post_submit(
    State(state): State<AdminState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AdminPostForm>,
) -> Response {
    const SOURCE: &str = "infra::http::admin::posts::admin_post_submit";
    let json = wants_json(&headers);

    let route = match PostRoute::from_segment(&segment) {
        Ok(route) => route,
        Err(err) => return admin_post_error(SOURCE, err.into(), json),
    };

    match state.posts.submit(&admin, &route, form.into()).await {
        Ok(PostMutationOutcome::Redirect { location }) => Redirect::to(location).into_response(),
        Ok(PostMutationOutcome::Rejected { errors, fields }) => {
            rejected_response(SOURCE, &admin, &route, errors, fields, json)
        }
        Err(err) => admin_post_error(SOURCE, err, json),
    }
}

fn rejected_response(
    source: &'static str,
    admin: &AdminIdentity,
    route: &PostRoute,
    errors: PostFieldErrors,
    fields: PostFields,
    json: bool,
) -> Response {
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    let mut response = if json {
        (status, Json(errors)).into_response()
    } else {
        render_editor(
            admin,
            "Fix the highlighted fields",
            AdminPostEditorView::rejected(route, fields, errors),
            status,
        )
    };
    ErrorReport::from_message(source, status, "post form failed validation")
        .attach(&mut response);
    response
}

fn render_editor(
    admin: &AdminIdentity,
    title: &str,
    view: AdminPostEditorView,
    status: StatusCode,
) -> Response {
    let view = AdminLayout::new(title, admin.name(), view);
    render_template_response(AdminPostEditTemplate { view }, status)
}
