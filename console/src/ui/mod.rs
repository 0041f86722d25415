//! Terminal presentation helpers

pub mod badge;
pub mod confirm;
pub mod notice;
pub mod render;
pub mod terminal;
