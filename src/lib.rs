//! Grove - terminal UI for inspecting and managing git worktrees
//!
//! This library provides the session engine, its surfaces and the git adapter behind
//! the `grove` binary.

pub mod app;
pub mod config;
pub mod git;
pub mod input;
pub mod logging;
pub mod tui;
