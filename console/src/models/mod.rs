//! Domain models decoded from the REST API

pub mod deployment;
pub mod framework;
pub mod github;
pub mod project;
pub mod user;
