//! Command-line host for the ranting dashboard.
//!
//! Parses arguments, installs logging and dispatches each command to the view
//! types of `ranting-core` over a directory-backed database.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
