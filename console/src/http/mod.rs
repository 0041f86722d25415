//! REST API client

pub mod client;
pub mod deployments;
pub mod frameworks;
pub mod github;
pub mod projects;
pub mod session;
pub mod users;
pub mod webhooks;
