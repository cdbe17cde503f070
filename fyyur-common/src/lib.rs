//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking site:
//! - Database models and queries (venues, artists, shows)
//! - Form binding and validation
//! - Read-side view models (location grouping, show history, search)
//! - Configuration loading
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod time;
pub mod views;

pub use error::{Error, Result};
