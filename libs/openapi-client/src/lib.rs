//! Wire models for the Lang Platform REST API

pub mod models;
