//! # prompt-extract
//!
//! Test runs of the extraction client dump every prompt they send to the model into a debug
//! log, wrapped between a `PROMPT COMPLET pour <json-pointer>` line and a `FIN PROMPT` line,
//! interleaved with the test runner's own console chatter. This crate recovers those prompts
//! and lays them out as a Markdown document so each one can be replayed by hand on the
//! extraction platform.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐  path   ┌────────────────┐  regions  ┌──────────────────┐
//! │ locate       │ ──────▶ │ extract        │ ────────▶ │ render           │
//! │ newest log   │         │ state machine  │           │ Markdown document│
//! └──────────────┘         └────────────────┘           └──────────────────┘
//! ```
//!
//! Everything is sequential: one directory scan, one full read, one pass over the lines, one
//! write. The library never prints and never exits; the binary's `cli` module owns the console
//! report, logging setup and exit codes.
//!
//! ## Module Overview
//!
//! - [`api`]: facade binding a configuration to a working directory
//! - [`config`]: markers, file patterns and document text as serde-loadable data
//! - [`locate`]: candidate log discovery and selection
//! - [`extract`]: region extraction
//! - [`render`]: document rendering
//! - [`error`]: error types

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod locate;
pub mod render;
