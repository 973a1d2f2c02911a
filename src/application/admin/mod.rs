//! Admin-facing application services.

pub mod posts;
pub mod sessions;
