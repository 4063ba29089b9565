//! Working tree snapshots
//!
//! A snapshot turns the visible contents of the workspace into stored blobs
//! and trees, bottom-up, and yields the root tree ID.

pub mod builder;
