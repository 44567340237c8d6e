//! # Drop Four
//!
//! Move selection for a six-by-seven, four-in-a-row drop game: a fixed-depth
//! minimax search with alpha-beta pruning that only scores completed lines.
//!
//! ## Modules
//!
//! - [`game`] — Board with in-place place/undo, line detection, game state
//! - [`ai`] — Alpha-beta searcher, root move selector, agents
//! - [`api`] — `{"board": ...}` → `{"column": ...}` entry point
//! - [`arena`] — Search agent vs random baseline
//! - [`ui`] — Terminal UI: play against the engine
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod api;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
