use serde::Serialize;

use crate::domain::entities::PostRecord;

/// JSON shape of a post on the admin surface.
#[derive(Debug, Serialize)]
pub(super) struct PostPayload<'a> {
    pub(super) slug: &'a str,
    pub(super) title: &'a str,
    pub(super) markdown: &'a str,
}

impl<'a> From<&'a PostRecord> for PostPayload<'a> {
    fn from(post: &'a PostRecord) -> Self {
        Self {
            slug: &post.slug,
            title: &post.title,
            markdown: &post.markdown,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PostEnvelope<'a> {
    pub(super) post: PostPayload<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct PostListEnvelope<'a> {
    pub(super) posts: Vec<PostPayload<'a>>,
}
