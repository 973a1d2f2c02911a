mod commands;
mod queries;
mod service;
pub mod types;

pub use service::*;
pub use types::{
    ADMIN_POSTS_PATH, AdminPostError, PostEditor, PostMutationOutcome, PostSubmission,
};
