//! # Sonnet Common Library
//!
//! Shared code for the sonnet rhyme tools including:
//! - Error and result types
//! - Bootstrap configuration and root folder resolution
//! - Database initialization (rhyme cache schema)

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
