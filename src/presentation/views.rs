use crate::application::error::{ErrorReport, HttpError};
use crate::domain::entities::PostSummary;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// HTML error page carrying `message`, with the report attached for the response logger.
pub fn render_error_response(
    source: &'static str,
    status: StatusCode,
    message: impl Into<String>,
) -> Response {
    let message = message.into();
    let title = status
        .canonical_reason()
        .unwrap_or("Something went wrong")
        .to_string();
    let view = LayoutContext::new(
        PageMetaView::titled(title.clone()),
        ErrorPageView {
            title,
            message: message.clone(),
            primary_action: Some(ErrorAction::posts()),
        },
    );
    let mut response = render_template_response(ErrorTemplate { view }, status);
    ErrorReport::from_message(source, status, message).attach(&mut response);
    response
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
}

impl PageMetaView {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(meta: PageMetaView, content: T) -> Self {
        Self { meta, content }
    }
}

pub struct PostListView {
    pub posts: Vec<PostSummary>,
    /// Shown only when the visitor already holds an admin credential.
    pub show_admin_link: bool,
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostListTemplate {
    pub view: LayoutContext<PostListView>,
}

pub struct PostDetailView {
    pub slug: String,
    pub title: String,
    /// Sanitised HTML rendered from the post markdown.
    pub body_html: String,
}

#[derive(Template)]
#[template(path = "posts/detail.html")]
pub struct PostDetailTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct LoginView {
    pub error: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub view: LayoutContext<LoginView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn posts() -> Self {
        Self {
            href: "/posts".to_string(),
            label: "Back to posts".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
