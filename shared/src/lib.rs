//! Shared types and JSON contracts for the Thai Weather Dashboard
//!
//! This crate contains the response shapes served to the page layer. It is
//! pure data: no I/O, no upstream knowledge beyond the field names the
//! dashboard contracts expose.

pub mod models;

pub use models::*;
