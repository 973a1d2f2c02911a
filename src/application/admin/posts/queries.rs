use crate::application::admin::sessions::AdminIdentity;
use crate::domain::entities::PostRecord;
use crate::domain::posts::PostRoute;

use super::service::AdminPostService;
use super::types::{AdminPostError, PostEditor};

impl AdminPostService {
    pub async fn list_posts(
        &self,
        _admin: &AdminIdentity,
    ) -> Result<Vec<PostRecord>, AdminPostError> {
        self.reader.list_posts().await.map_err(AdminPostError::from)
    }

    pub async fn load_editor(
        &self,
        _admin: &AdminIdentity,
        route: &PostRoute,
    ) -> Result<PostEditor, AdminPostError> {
        match route {
            PostRoute::New => Ok(PostEditor::Create),
            PostRoute::Existing(slug) => self
                .reader
                .find_by_slug(slug)
                .await?
                .map(PostEditor::Edit)
                .ok_or_else(|| AdminPostError::not_found(slug)),
        }
    }
}
