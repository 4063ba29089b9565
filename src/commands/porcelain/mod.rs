//! Porcelain commands
//!
//! - `init`: Initialize a new repository
//! - `commit`: Snapshot the working directory as a new commit
//! - `branch`: Create a branch at the current commit
//! - `checkout`: Switch to a branch or detach at a commit

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
