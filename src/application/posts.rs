//! Public read side: the post listing and the single post page.

use std::sync::Arc;

use thiserror::Error;

use crate::application::render::MarkdownRenderer;
use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::{PostRecord, PostSummary};
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    NotFound(DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostRecord,
    pub html: String,
}

#[derive(Clone)]
pub struct PostService {
    reader: Arc<dyn PostsRepo>,
    renderer: Arc<MarkdownRenderer>,
}

impl PostService {
    pub fn new(reader: Arc<dyn PostsRepo>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self { reader, renderer }
    }

    pub async fn list_summaries(&self) -> Result<Vec<PostSummary>, PostError> {
        Ok(self.reader.list_summaries().await?)
    }

    pub async fn load_post(&self, slug: &str) -> Result<PostDetail, PostError> {
        let post = self
            .reader
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| PostError::NotFound(DomainError::not_found("Post", slug)))?;
        let html = self.renderer.render(&post.markdown);
        Ok(PostDetail { post, html })
    }

    pub async fn health_check(&self) -> Result<(), RepoError> {
        self.reader.ping().await
    }
}
