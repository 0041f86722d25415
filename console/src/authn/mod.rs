//! Session handling

pub mod session;
