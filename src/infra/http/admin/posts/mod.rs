mod errors;
mod forms;
mod handlers;
mod response;

pub(super) use handlers::{admin_post_editor, admin_post_submit, admin_posts_index};
