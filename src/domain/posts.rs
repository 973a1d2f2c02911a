//! Post editing rules: route parsing, intent resolution and field validation.

use serde::Serialize;

use super::error::DomainError;

/// Path segment that selects the create form instead of an existing post.
pub const NEW_POST_SEGMENT: &str = "new";
/// Form value of the `intent` field that requests deletion.
pub const DELETE_INTENT: &str = "delete";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const SLUG_REQUIRED: &str = "Slug is required";
pub const MARKDOWN_REQUIRED: &str = "Markdown is required";
pub const SLUG_TAKEN: &str = "A post with this slug already exists";
pub const SLUG_RESERVED: &str = "This slug is reserved for the new post form";

/// The post an admin route addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRoute {
    New,
    Existing(String),
}

impl PostRoute {
    /// Parses the `:slug` route segment. An empty segment means the route was
    /// mounted without its parameter, which is a wiring bug rather than bad input.
    pub fn from_segment(segment: &str) -> Result<Self, DomainError> {
        if segment.is_empty() {
            return Err(DomainError::invariant("post route requires a slug segment"));
        }
        if segment == NEW_POST_SEGMENT {
            Ok(Self::New)
        } else {
            Ok(Self::Existing(segment.to_string()))
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }

    pub fn segment(&self) -> &str {
        match self {
            Self::New => NEW_POST_SEGMENT,
            Self::Existing(slug) => slug,
        }
    }
}

/// The single mutation a submitted editor form performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostIntent {
    Create,
    Update { current_slug: String },
    Delete { slug: String },
}

impl PostIntent {
    /// Resolves the mutation from the route and the optional `intent` form value.
    /// A delete request takes priority over everything else in the form.
    pub fn resolve(route: &PostRoute, intent: Option<&str>) -> Result<Self, DomainError> {
        let wants_delete = intent == Some(DELETE_INTENT);
        match (route, wants_delete) {
            (PostRoute::Existing(slug), true) => Ok(Self::Delete { slug: slug.clone() }),
            (PostRoute::New, true) => Err(DomainError::invariant(
                "delete requested for a post that has not been created",
            )),
            (PostRoute::New, false) => Ok(Self::Create),
            (PostRoute::Existing(slug), false) => Ok(Self::Update {
                current_slug: slug.clone(),
            }),
        }
    }
}

/// Raw editor input as submitted; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

/// A complete post body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

/// Per-field messages; `None` marks a field that passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostFieldErrors {
    pub title: Option<&'static str>,
    pub slug: Option<&'static str>,
    pub markdown: Option<&'static str>,
}

impl PostFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.markdown.is_none()
    }

    pub fn slug_taken() -> Self {
        Self {
            slug: Some(SLUG_TAKEN),
            ..Self::default()
        }
    }
}

impl PostFields {
    /// Checks every field independently so the editor can flag all of them at once.
    pub fn validate(&self) -> Result<PostDraft, PostFieldErrors> {
        let errors = PostFieldErrors {
            title: required(self.title.as_deref(), TITLE_REQUIRED),
            slug: required(self.slug.as_deref(), SLUG_REQUIRED).or_else(|| {
                (self.slug.as_deref() == Some(NEW_POST_SEGMENT)).then_some(SLUG_RESERVED)
            }),
            markdown: required(self.markdown.as_deref(), MARKDOWN_REQUIRED),
        };

        match (&self.title, &self.slug, &self.markdown) {
            (Some(title), Some(slug), Some(markdown)) if errors.is_empty() => Ok(PostDraft {
                slug: slug.clone(),
                title: title.clone(),
                markdown: markdown.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn required(value: Option<&str>, message: &'static str) -> Option<&'static str> {
    match value {
        Some(value) if !value.is_empty() => None,
        _ => Some(message),
    }
}
