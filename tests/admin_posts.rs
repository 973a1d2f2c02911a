mod support;

use blogdesk::application::admin::posts::{
    ADMIN_POSTS_PATH, AdminPostError, PostEditor, PostMutationOutcome, PostSubmission,
};
use blogdesk::application::admin::sessions::AdminIdentity;
use blogdesk::domain::error::DomainError;
use blogdesk::domain::posts::{
    MARKDOWN_REQUIRED, PostFieldErrors, PostFields, PostRoute, SLUG_REQUIRED, SLUG_RESERVED,
    SLUG_TAKEN, TITLE_REQUIRED,
};

use support::{InMemoryPosts, admin_service};

fn admin() -> AdminIdentity {
    AdminIdentity::new("editor")
}

fn submission(intent: Option<&str>, title: &str, slug: &str, markdown: &str) -> PostSubmission {
    PostSubmission {
        intent: intent.map(str::to_string),
        fields: PostFields {
            title: Some(title.to_string()),
            slug: Some(slug.to_string()),
            markdown: Some(markdown.to_string()),
        },
    }
}

fn existing(slug: &str) -> PostRoute {
    PostRoute::Existing(slug.to_string())
}

fn redirect() -> PostMutationOutcome {
    PostMutationOutcome::Redirect {
        location: ADMIN_POSTS_PATH,
    }
}

#[tokio::test]
async fn created_post_reads_back_with_submitted_fields() {
    let store = InMemoryPosts::new();
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &PostRoute::New,
            submission(None, "Hello", "hello", "# Hi"),
        )
        .await
        .expect("create");

    assert_eq!(outcome, redirect());
    let post = store.get("hello").expect("stored");
    assert_eq!(post.title, "Hello");
    assert_eq!(post.markdown, "# Hi");
}

#[tokio::test]
async fn update_with_same_slug_changes_content() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "old")]);
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &existing("hello"),
            submission(Some("update"), "Hello again", "hello", "new"),
        )
        .await
        .expect("update");

    assert_eq!(outcome, redirect());
    let post = store.get("hello").expect("still stored");
    assert_eq!(post.title, "Hello again");
    assert_eq!(post.markdown, "new");
}

#[tokio::test]
async fn update_with_new_slug_rekeys_the_post() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    service
        .submit(
            &admin(),
            &existing("hello"),
            submission(None, "Hello", "hello-world", "body"),
        )
        .await
        .expect("rename");

    assert!(store.get("hello").is_none());
    assert_eq!(store.get("hello-world").expect("renamed").title, "Hello");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &existing("hello"),
            submission(Some("delete"), "Hello", "hello", "body"),
        )
        .await
        .expect("delete");

    assert_eq!(outcome, redirect());
    assert!(store.get("hello").is_none());
}

#[tokio::test]
async fn delete_intent_alone_skips_validation() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &existing("hello"),
            PostSubmission {
                intent: Some("delete".to_string()),
                fields: PostFields::default(),
            },
        )
        .await
        .expect("delete");

    assert_eq!(outcome, redirect());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn each_empty_field_is_reported_alone_without_writing() {
    let cases = [
        (
            submission(None, "", "hello", "body"),
            PostFieldErrors {
                title: Some(TITLE_REQUIRED),
                ..PostFieldErrors::default()
            },
        ),
        (
            submission(None, "Hello", "", "body"),
            PostFieldErrors {
                slug: Some(SLUG_REQUIRED),
                ..PostFieldErrors::default()
            },
        ),
        (
            submission(None, "Hello", "hello", ""),
            PostFieldErrors {
                markdown: Some(MARKDOWN_REQUIRED),
                ..PostFieldErrors::default()
            },
        ),
    ];

    for (submitted, expected) in cases {
        let store = InMemoryPosts::new();
        let service = admin_service(&store);
        let fields = submitted.fields.clone();

        let outcome = service
            .submit(&admin(), &PostRoute::New, submitted)
            .await
            .expect("rejected, not failed");

        assert_eq!(
            outcome,
            PostMutationOutcome::Rejected {
                errors: expected,
                fields,
            }
        );
        assert_eq!(store.writes(), 0);
    }
}

#[tokio::test]
async fn whitespace_only_title_is_accepted() {
    let store = InMemoryPosts::new();
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &PostRoute::New,
            submission(None, " ", "hello", "# Hi"),
        )
        .await
        .expect("create");

    assert_eq!(outcome, redirect());
    assert_eq!(store.get("hello").expect("stored").title, " ");
}

#[tokio::test]
async fn renaming_onto_the_new_segment_is_rejected() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &existing("hello"),
            submission(None, "Hello", "new", "body"),
        )
        .await
        .expect("rejected");

    assert!(matches!(
        outcome,
        PostMutationOutcome::Rejected { ref errors, .. } if errors.slug == Some(SLUG_RESERVED)
    ));
    assert_eq!(store.writes(), 0);
    assert!(store.get("hello").is_some());
}

#[tokio::test]
async fn invalid_update_leaves_the_post_untouched() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    let outcome = service
        .submit(
            &admin(),
            &existing("hello"),
            submission(None, "", "hello", "changed"),
        )
        .await
        .expect("rejected");

    assert!(matches!(outcome, PostMutationOutcome::Rejected { .. }));
    assert_eq!(store.writes(), 0);
    assert_eq!(store.get("hello").expect("stored").markdown, "body");
}

#[tokio::test]
async fn duplicate_slug_becomes_a_field_error() {
    let store = InMemoryPosts::with_posts(&[
        ("hello", "Hello", "body"),
        ("other", "Other", "body"),
    ]);
    let service = admin_service(&store);

    let created = service
        .submit(
            &admin(),
            &PostRoute::New,
            submission(None, "Again", "hello", "text"),
        )
        .await
        .expect("rejected");
    let PostMutationOutcome::Rejected { errors, .. } = &created else {
        panic!("expected rejection, got {created:?}");
    };
    assert_eq!(errors.slug, Some(SLUG_TAKEN));

    let renamed = service
        .submit(
            &admin(),
            &existing("other"),
            submission(None, "Other", "hello", "body"),
        )
        .await
        .expect("rejected");
    assert!(matches!(
        renamed,
        PostMutationOutcome::Rejected { ref errors, .. } if errors.slug == Some(SLUG_TAKEN)
    ));
    assert_eq!(store.get("other").expect("unchanged").slug, "other");
}

#[tokio::test]
async fn editor_for_missing_slug_is_not_found() {
    let store = InMemoryPosts::new();
    let service = admin_service(&store);

    let err = service
        .load_editor(&admin(), &existing("does-not-exist"))
        .await
        .expect_err("missing");

    match err {
        AdminPostError::Domain(domain @ DomainError::NotFound { .. }) => {
            assert_eq!(
                domain.to_string(),
                "Post with slug \"does-not-exist\" does not exist"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn editor_modes_follow_the_route() {
    let store = InMemoryPosts::with_posts(&[("hello", "Hello", "body")]);
    let service = admin_service(&store);

    assert_eq!(
        service
            .load_editor(&admin(), &PostRoute::New)
            .await
            .expect("create mode"),
        PostEditor::Create
    );
    assert_eq!(store.calls(), 0);

    let PostEditor::Edit(post) = service
        .load_editor(&admin(), &existing("hello"))
        .await
        .expect("edit mode")
    else {
        panic!("expected edit mode");
    };
    assert_eq!(post.slug, "hello");
}

#[tokio::test]
async fn vanished_post_on_update_or_delete_is_not_found() {
    let store = InMemoryPosts::new();
    let service = admin_service(&store);

    let update = service
        .submit(
            &admin(),
            &existing("gone"),
            submission(None, "Gone", "gone", "body"),
        )
        .await;
    assert!(matches!(
        update,
        Err(AdminPostError::Domain(DomainError::NotFound { .. }))
    ));

    let delete = service
        .submit(
            &admin(),
            &existing("gone"),
            submission(Some("delete"), "", "", ""),
        )
        .await;
    assert!(matches!(
        delete,
        Err(AdminPostError::Domain(DomainError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn delete_on_the_new_route_is_a_contract_violation() {
    let store = InMemoryPosts::new();
    let service = admin_service(&store);

    let result = service
        .submit(
            &admin(),
            &PostRoute::New,
            submission(Some("delete"), "Hello", "hello", "body"),
        )
        .await;

    assert!(matches!(
        result,
        Err(AdminPostError::Domain(DomainError::Invariant { .. }))
    ));
    assert_eq!(store.calls(), 0);
}
