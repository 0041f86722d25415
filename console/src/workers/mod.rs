//! Background workers of the watch view and the `--follow` flags

pub mod deployment_follower;
pub mod log_follower;
pub mod status_poller;
