//! mindtree: a mind-map tree store with local persistence
//!
//! The crate is layered hexagonally:
//!
//! - [`domain`] — the tree store, its invariants, the visibility query and
//!   snapshot validation. Pure in-memory logic, no I/O.
//! - [`application`] — the command service: executes tree commands and
//!   performs the persist + render side effects after each success.
//! - [`infrastructure`] — boundary traits for persistence and rendering
//!   plus their real implementations.
//! - [`cli`] — the input adapter: clap commands, confirmation prompts and
//!   the terminal renderer.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
