//! # msgstore Architecture
//!
//! msgstore keeps notes in *directories*: a list of folders, each holding a list
//! of text messages. It is a library that happens to ship a terminal client;
//! the same core could back a mobile app or a web page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Interactive session, argument parsing, rendering         │
//! │  - The ONLY place that knows about stdin/stdout/stderr      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Screens (screens/)                                         │
//! │  - Cached view state, filters, dialog state machines        │
//! │  - Re-fetch after every mutation                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) → Commands (commands/*.rs)                    │
//! │  - Facade owning both stores; business operations           │
//! │  - Returns `Result<CmdResult>` with notices                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - DirectoryStore / MessageStore traits                     │
//! │  - In-memory implementations; nothing is persisted          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Kinds of "Message"
//!
//! A directory record carries an inline list of plain-text notes, and its
//! `message_count` is the length of that list. Separately, the message store
//! holds structured message records (id, text, creation time) per directory.
//! The two are never reconciled. The message screen shows the records; the
//! inline notes are reached through `add_note`/`remove_note`.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Everything outside `cli/`:
//! - Takes regular Rust arguments and returns regular Rust types
//! - **Never** writes to stdout/stderr
//! - **Never** installs a tracing subscriber (it only emits events)
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic per operation
//! - [`store`]: Storage contracts and in-memory implementations
//! - [`screens`]: Directory and message screen controllers
//! - [`model`]: Core data types (`Directory`, `Message`, ids)
//! - [`index`]: 1-based row numbers for on-screen selection
//! - [`config`]: Client configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod screens;
pub mod store;
