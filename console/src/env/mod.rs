//! Environment variable tooling

pub mod editor;
pub mod parser;
