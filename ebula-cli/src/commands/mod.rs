//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`drive`] - Live session with the auto tick
//! - [`position`] - One-shot position for a clock time
//! - [`timeline`] - Merged timeline of a bundle

pub mod common;
pub mod config;
pub mod drive;
pub mod position;
pub mod timeline;
