use askama::Template;
use time::format_description::well_known::Rfc3339;

use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostFieldErrors, PostFields, PostRoute};

const EXCERPT_CHARS: usize = 80;

#[derive(Clone)]
pub struct AdminMetaView {
    pub title: String,
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub meta: AdminMetaView,
    pub admin_name: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(title: impl Into<String>, admin_name: impl Into<String>, content: T) -> Self {
        Self {
            meta: AdminMetaView {
                title: title.into(),
            },
            admin_name: admin_name.into(),
            content,
        }
    }
}

#[derive(Clone)]
pub struct AdminPostRowView {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub updated_at: String,
    pub edit_href: String,
    pub public_href: String,
}

impl From<&PostRecord> for AdminPostRowView {
    fn from(post: &PostRecord) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: excerpt(&post.markdown),
            updated_at: post.updated_at.format(&Rfc3339).unwrap_or_default(),
            edit_href: format!("/posts/admin/{}", post.slug),
            public_href: format!("/posts/{}", post.slug),
        }
    }
}

#[derive(Clone)]
pub struct AdminPostListView {
    pub posts: Vec<AdminPostRowView>,
    pub new_post_href: String,
}

impl AdminPostListView {
    pub fn from_records(posts: &[PostRecord]) -> Self {
        Self {
            posts: posts.iter().map(AdminPostRowView::from).collect(),
            new_post_href: "/posts/admin/new".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/index.html")]
pub struct AdminPostsTemplate {
    pub view: AdminLayout<AdminPostListView>,
}

#[derive(Clone, Default)]
pub struct AdminPostEditorView {
    pub heading: String,
    pub form_action: String,
    pub is_new: bool,
    pub title: String,
    pub slug: String,
    pub markdown: String,
    pub errors: PostFieldErrors,
}

impl AdminPostEditorView {
    pub fn create() -> Self {
        Self {
            heading: "New post".to_string(),
            form_action: form_action(&PostRoute::New),
            is_new: true,
            ..Self::default()
        }
    }

    pub fn edit(post: &PostRecord) -> Self {
        Self {
            heading: format!("Edit \u{201c}{}\u{201d}", post.title),
            form_action: format!("/posts/admin/{}", post.slug),
            is_new: false,
            title: post.title.clone(),
            slug: post.slug.clone(),
            markdown: post.markdown.clone(),
            errors: PostFieldErrors::default(),
        }
    }

    /// Re-renders a rejected submission with the values the admin typed.
    pub fn rejected(route: &PostRoute, fields: PostFields, errors: PostFieldErrors) -> Self {
        let PostFields {
            title,
            slug,
            markdown,
        } = fields;
        let heading = if route.is_new() {
            "New post".to_string()
        } else {
            format!("Edit {}", route.segment())
        };

        Self {
            heading,
            form_action: form_action(route),
            is_new: route.is_new(),
            title: title.unwrap_or_default(),
            slug: slug.unwrap_or_default(),
            markdown: markdown.unwrap_or_default(),
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/editor.html")]
pub struct AdminPostEditTemplate {
    pub view: AdminLayout<AdminPostEditorView>,
}

fn form_action(route: &PostRoute) -> String {
    format!("/posts/admin/{}", route.segment())
}

fn excerpt(markdown: &str) -> String {
    let flat = markdown.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
