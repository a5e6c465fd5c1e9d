//! # CLI Layer
//!
//! This module is **one possible UI client** for msgstore, not the application
//! itself. It is the only place that:
//! - Reads stdin and writes stdout/stderr
//! - Parses arguments and session commands
//! - Installs the tracing subscriber
//! - Formats output for humans
//!
//! ## Structure
//!
//! - [`setup`]: clap definitions for the binary flags and the per-screen
//!   session commands
//! - [`commands`]: start-up and the interactive session loop
//! - [`render`]: template rendering of screens and notices
//! - [`styles`] / [`templates`]: the theme and the template sources

pub mod commands;
pub mod render;
pub mod setup;
pub mod styles;
pub mod templates;
