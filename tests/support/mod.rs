#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{Router, body::Body};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use uuid::Uuid;

use blogdesk::application::admin::posts::AdminPostService;
use blogdesk::application::admin::sessions::{AdminSessions, TokenAdminSessions};
use blogdesk::application::posts::PostService;
use blogdesk::application::render::MarkdownRenderer;
use blogdesk::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use blogdesk::domain::entities::{PostRecord, PostSummary};
use blogdesk::infra::http::{AdminState, HttpState, build_router};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const ADMIN_NAME: &str = "editor";

/// In-memory post store keyed by slug, counting every call that reaches it.
#[derive(Default)]
pub struct InMemoryPosts {
    posts: Mutex<BTreeMap<String, PostRecord>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryPosts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_posts(posts: &[(&str, &str, &str)]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.posts.lock().expect("posts lock");
            for (slug, title, markdown) in posts {
                map.insert(slug.to_string(), record(slug, title, markdown));
            }
        }
        Arc::new(store)
    }

    pub fn get(&self, slug: &str) -> Option<PostRecord> {
        self.posts.lock().expect("posts lock").get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.posts.lock().expect("posts lock").len()
    }

    /// Repository calls of any kind.
    pub fn calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.writes.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, PostRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.posts.lock().expect("posts lock")
    }

    fn write(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, PostRecord>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.posts.lock().expect("posts lock")
    }
}

fn record(slug: &str, title: &str, markdown: &str) -> PostRecord {
    let now = OffsetDateTime::now_utc();
    PostRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: title.to_string(),
        markdown: markdown.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl PostsRepo for InMemoryPosts {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        Ok(self.read().values().map(PostSummary::from).collect())
    }

    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.read().values().cloned().collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        Ok(self.read().get(slug).cloned())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryPosts {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.write();
        if posts.contains_key(&params.slug) {
            return Err(RepoError::Duplicate {
                constraint: "posts_slug_key".to_string(),
            });
        }
        let post = record(&params.slug, &params.title, &params.markdown);
        posts.insert(post.slug.clone(), post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.write();
        if params.slug != params.current_slug && posts.contains_key(&params.slug) {
            return Err(RepoError::Duplicate {
                constraint: "posts_slug_key".to_string(),
            });
        }
        let mut post = posts
            .remove(&params.current_slug)
            .ok_or(RepoError::NotFound)?;
        post.slug = params.slug;
        post.title = params.title;
        post.markdown = params.markdown;
        post.updated_at = OffsetDateTime::now_utc();
        posts.insert(post.slug.clone(), post.clone());
        Ok(post)
    }

    async fn delete_post(&self, slug: &str) -> Result<(), RepoError> {
        self.write()
            .remove(slug)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

/// Store whose every call fails the same way, standing in for an unreachable database.
pub struct FailingPosts {
    timeout: bool,
    calls: AtomicUsize,
}

impl FailingPosts {
    pub fn persistence() -> Arc<Self> {
        Arc::new(Self {
            timeout: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn timeout() -> Arc<Self> {
        Arc::new(Self {
            timeout: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.timeout {
            Err(RepoError::Timeout)
        } else {
            Err(RepoError::Persistence("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl PostsRepo for FailingPosts {
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        self.fail()
    }

    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.fail()
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<PostRecord>, RepoError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.fail()
    }
}

#[async_trait]
impl PostsWriteRepo for FailingPosts {
    async fn create_post(&self, _params: CreatePostParams) -> Result<PostRecord, RepoError> {
        self.fail()
    }

    async fn update_post(&self, _params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        self.fail()
    }

    async fn delete_post(&self, _slug: &str) -> Result<(), RepoError> {
        self.fail()
    }
}

pub fn sessions() -> Arc<dyn AdminSessions> {
    Arc::new(TokenAdminSessions::new(ADMIN_NAME, ADMIN_TOKEN))
}

pub fn admin_service(store: &Arc<InMemoryPosts>) -> AdminPostService {
    AdminPostService::new(store.clone(), store.clone())
}

/// The production router wired to the in-memory store.
pub fn router(store: &Arc<InMemoryPosts>) -> Router {
    router_with(store.clone(), store.clone())
}

/// The production router wired to arbitrary repositories.
pub fn router_with(reader: Arc<dyn PostsRepo>, writer: Arc<dyn PostsWriteRepo>) -> Router {
    let sessions = sessions();
    let http = HttpState {
        posts: Arc::new(PostService::new(
            reader.clone(),
            Arc::new(MarkdownRenderer::new()),
        )),
        sessions: sessions.clone(),
    };
    let admin = AdminState {
        posts: Arc::new(AdminPostService::new(reader, writer)),
        sessions,
    };
    build_router(http, admin)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
