//! Lang Console Library
//!
//! Client-side core of the Lang deployment platform console: typed access to
//! the REST API, the deployment status and log polling controller, and the
//! terminal presentation used by `langctl`.

pub mod app;
pub mod authn;
pub mod controller;
pub mod env;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;
pub mod workers;
