use std::sync::Arc;

use crate::application::admin::{posts::AdminPostService, sessions::AdminSessions};

#[derive(Clone)]
pub struct AdminState {
    pub posts: Arc<AdminPostService>,
    pub sessions: Arc<dyn AdminSessions>,
}
