//! Core types and trait definitions for the Bazaar catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod category;
pub mod error;
pub mod item;
pub mod store;

pub use error::{Error, Result};
