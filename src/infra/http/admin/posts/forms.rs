use serde::Deserialize;

use crate::application::admin::posts::PostSubmission;
use crate::domain::posts::PostFields;

/// Editor form body. Every field is optional so a bare `intent=delete` parses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminPostForm {
    pub(crate) intent: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) markdown: Option<String>,
}

impl From<AdminPostForm> for PostSubmission {
    fn from(form: AdminPostForm) -> Self {
        let AdminPostForm {
            intent,
            title,
            slug,
            markdown,
        } = form;

        Self {
            intent,
            fields: PostFields {
                title,
                slug,
                markdown,
            },
        }
    }
}
