//! Loose object types and operations
//!
//! Every piece of content is stored as an object identified by the SHA-1 hash of
//! its canonical serialization. There are three kinds:
//!
//! - **Blob**: File content, or a symbolic link's target path (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (tree, parent commits, author, committer, message)
//!
//! All objects share the same envelope: `<type> <size>\0<body>`

pub mod base16;
pub mod blob;
pub mod commit;
pub mod node_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
