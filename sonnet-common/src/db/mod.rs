//! Database bootstrap for the rhyme cache

pub mod init;

pub use init::*;
