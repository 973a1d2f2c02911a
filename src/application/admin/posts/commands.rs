use metrics::counter;
use tracing::info;

use crate::application::admin::sessions::AdminIdentity;
use crate::application::repos::{CreatePostParams, RepoError, UpdatePostParams};
use crate::domain::posts::{PostDraft, PostFieldErrors, PostFields, PostIntent, PostRoute};
use crate::infra::telemetry::POST_MUTATIONS_TOTAL;

use super::service::AdminPostService;
use super::types::{AdminPostError, PostMutationOutcome, PostSubmission};

impl AdminPostService {
    /// Runs the editor form action: resolve the intent, validate when the intent
    /// writes content, then perform exactly one repository mutation.
    pub async fn submit(
        &self,
        admin: &AdminIdentity,
        route: &PostRoute,
        submission: PostSubmission,
    ) -> Result<PostMutationOutcome, AdminPostError> {
        let PostSubmission { intent, fields } = submission;
        let intent = PostIntent::resolve(route, intent.as_deref())?;

        match intent {
            PostIntent::Delete { slug } => self.delete_post(admin, &slug).await,
            PostIntent::Create => match fields.validate() {
                Ok(draft) => self.create_post(admin, draft, fields).await,
                Err(errors) => Ok(PostMutationOutcome::Rejected { errors, fields }),
            },
            PostIntent::Update { current_slug } => match fields.validate() {
                Ok(draft) => self.update_post(admin, &current_slug, draft, fields).await,
                Err(errors) => Ok(PostMutationOutcome::Rejected { errors, fields }),
            },
        }
    }

    async fn create_post(
        &self,
        admin: &AdminIdentity,
        draft: PostDraft,
        fields: PostFields,
    ) -> Result<PostMutationOutcome, AdminPostError> {
        let PostDraft {
            slug,
            title,
            markdown,
        } = draft;

        match self
            .writer
            .create_post(CreatePostParams {
                slug,
                title,
                markdown,
            })
            .await
        {
            Ok(post) => {
                record_mutation("create");
                info!(
                    target = "blogdesk::admin::posts",
                    actor = admin.name(),
                    slug = %post.slug,
                    "post created"
                );
                Ok(PostMutationOutcome::to_admin_listing())
            }
            Err(RepoError::Duplicate { .. }) => Ok(PostMutationOutcome::Rejected {
                errors: PostFieldErrors::slug_taken(),
                fields,
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_post(
        &self,
        admin: &AdminIdentity,
        current_slug: &str,
        draft: PostDraft,
        fields: PostFields,
    ) -> Result<PostMutationOutcome, AdminPostError> {
        let PostDraft {
            slug,
            title,
            markdown,
        } = draft;

        let params = UpdatePostParams {
            current_slug: current_slug.to_string(),
            slug,
            title,
            markdown,
        };

        match self.writer.update_post(params).await {
            Ok(post) => {
                record_mutation("update");
                info!(
                    target = "blogdesk::admin::posts",
                    actor = admin.name(),
                    previous_slug = current_slug,
                    slug = %post.slug,
                    "post updated"
                );
                Ok(PostMutationOutcome::to_admin_listing())
            }
            Err(RepoError::NotFound) => Err(AdminPostError::not_found(current_slug)),
            Err(RepoError::Duplicate { .. }) => Ok(PostMutationOutcome::Rejected {
                errors: PostFieldErrors::slug_taken(),
                fields,
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_post(
        &self,
        admin: &AdminIdentity,
        slug: &str,
    ) -> Result<PostMutationOutcome, AdminPostError> {
        match self.writer.delete_post(slug).await {
            Ok(()) => {
                record_mutation("delete");
                info!(
                    target = "blogdesk::admin::posts",
                    actor = admin.name(),
                    slug = slug,
                    "post deleted"
                );
                Ok(PostMutationOutcome::to_admin_listing())
            }
            Err(RepoError::NotFound) => Err(AdminPostError::not_found(slug)),
            Err(err) => Err(err.into()),
        }
    }
}

fn record_mutation(intent: &'static str) {
    counter!(POST_MUTATIONS_TOTAL, "intent" => intent).increment(1);
}
