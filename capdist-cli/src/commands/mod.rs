//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`distances`] - Sorted pairwise distances (JSON or table)
//! - [`stream`] - Progress events as newline-delimited JSON
//! - [`countries`] - Known location codes
//! - [`cache_demo`] - Repeated requests against the result cache

pub mod cache_demo;
pub mod common;
pub mod countries;
pub mod distances;
pub mod stream;
