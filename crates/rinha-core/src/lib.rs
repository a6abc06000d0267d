//! Core types and trait definitions for the person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod person;
pub mod store;
pub mod validate;

pub use error::{Classify, Error, ErrorKind, Result, ValidationError};
pub use validate::validate;
