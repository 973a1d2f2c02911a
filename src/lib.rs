//! Blogdesk: a server-rendered blog with a public post listing and an admin-only post editor.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
