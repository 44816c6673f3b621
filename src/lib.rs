// ABOUTME: Library root for stolos - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cluster;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod rollout;
pub mod types;
