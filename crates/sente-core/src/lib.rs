//! Core types and trait definitions for the Sente registration service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod level;
pub mod participant;
pub mod store;
pub mod token;
pub mod validate;

pub use error::{Error, Result};
