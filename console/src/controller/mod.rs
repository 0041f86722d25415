//! Deployment status and log polling controller

pub mod api;
pub mod lifecycle;
pub mod logs;
pub mod project;
pub mod snapshot;
pub mod view;
