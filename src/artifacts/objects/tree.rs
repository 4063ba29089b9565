//! Tree object
//!
//! Trees represent directory snapshots. They contain one node per directory
//! entry: files and executables (blobs), symbolic links (blobs holding the link
//! target), and subdirectories (other trees).
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are always emitted in ascending name order. Names are unique within
//! a tree, so the order is total and the serialization deterministic.

use crate::artifacts::objects::node_mode::NodeMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, expect_object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::ParseError;
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;
use std::io::{BufRead, Cursor};

/// A named reference from a tree to a blob or subtree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeNode {
    #[new(into)]
    pub name: String,
    pub mode: NodeMode,
    pub oid: ObjectId,
}

impl TreeNode {
    fn write_entry(&self, buffer: &mut BytesMut) {
        buffer.put_slice(self.mode.as_str().as_bytes());
        buffer.put_u8(b' ');
        buffer.put_slice(self.name.as_bytes());
        buffer.put_u8(0);
        buffer.put_slice(self.oid.as_bytes());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Build a tree from its children, in any order
    pub fn new(mut nodes: Vec<TreeNode>) -> Self {
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        Tree { nodes }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> impl Iterator<Item = TreeNode> {
        self.nodes.into_iter()
    }
}

impl Packable for Tree {
    fn body(&self) -> Bytes {
        let mut content = BytesMut::new();
        for node in &self.nodes {
            node.write_entry(&mut content);
        }

        content.freeze()
    }
}

impl Unpackable for Tree {
    fn deserialize(raw: &[u8]) -> anyhow::Result<Self> {
        let mut reader = Cursor::new(expect_object(raw, ObjectType::Tree)?);
        let mut nodes = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(ParseError::TruncatedEntry("unexpected end of body in mode").into());
            }
            let mode = String::from_utf8_lossy(&mode_bytes);
            let mode = NodeMode::try_from(mode.as_ref())?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(ParseError::MissingNul.into());
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|_| ParseError::TruncatedEntry("entry name is not valid UTF-8"))?;

            let oid = ObjectId::read_raw_from(&mut reader)
                .map_err(|_| ParseError::TruncatedEntry("unexpected end of body in object id"))?;

            // names must be strictly ascending, which also rules out duplicates
            if nodes.last().is_some_and(|prev: &TreeNode| prev.name >= name) {
                return Err(ParseError::UnsortedEntry(name).into());
            }

            nodes.push(TreeNode::new(name, mode, oid));
        }

        Ok(Tree { nodes })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.nodes
            .iter()
            .map(|node| {
                format!(
                    "{:0>6} {} {}\t{}",
                    node.mode.as_str(),
                    node.mode.object_type(),
                    node.oid,
                    node.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
