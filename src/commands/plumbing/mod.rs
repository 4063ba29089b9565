//! Plumbing commands
//!
//! - `cat-file`: Print a stored object in human-readable form

pub mod cat_file;
