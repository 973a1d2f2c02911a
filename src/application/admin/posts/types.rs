use thiserror::Error;

use crate::application::repos::RepoError;
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;
use crate::domain::posts::{PostFieldErrors, PostFields};

/// Where every successful admin mutation sends the browser.
pub const ADMIN_POSTS_PATH: &str = "/posts/admin";

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl AdminPostError {
    pub(crate) fn not_found(slug: &str) -> Self {
        Self::Domain(DomainError::not_found("Post", slug))
    }
}

/// What the editor form starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostEditor {
    Create,
    Edit(PostRecord),
}

/// A submitted editor form before intent resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSubmission {
    pub intent: Option<String>,
    pub fields: PostFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMutationOutcome {
    Redirect {
        location: &'static str,
    },
    /// Nothing was written; the form is shown again with the submitted values.
    Rejected {
        errors: PostFieldErrors,
        fields: PostFields,
    },
}

impl PostMutationOutcome {
    pub(crate) fn to_admin_listing() -> Self {
        Self::Redirect {
            location: ADMIN_POSTS_PATH,
        }
    }
}
