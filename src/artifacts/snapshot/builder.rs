use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::node_mode::NodeMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeNode};
use crate::errors::InvariantError;
use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stores the workspace as a tree of objects.
///
/// Entries are visited children-first. Each finished entry leaves a
/// [`TreeNode`] behind keyed by its path; when its parent directory is
/// visited, the parent claims those nodes, stores its own tree and leaves a
/// node in turn. The root directory's tree is the result.
pub struct SnapshotBuilder<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    pending: HashMap<PathBuf, TreeNode>,
}

impl<'r> SnapshotBuilder<'r> {
    pub fn new(database: &'r Database, workspace: &'r Workspace) -> Self {
        SnapshotBuilder {
            database,
            workspace,
            pending: HashMap::new(),
        }
    }

    pub fn build(mut self) -> anyhow::Result<ObjectId> {
        for entry in self.workspace.list_bottom_up()? {
            let file_type = entry.file_type();
            let path = entry.path();

            if !Workspace::is_tracked_type(file_type) {
                tracing::warn!(path = %path.display(), "skipping unsupported file type");
                continue;
            }

            let (mode, oid) = if file_type.is_dir() {
                (NodeMode::Directory, self.store_directory(path)?)
            } else if file_type.is_symlink() {
                let target = self.workspace.read_link(path)?;
                (NodeMode::SymbolicLink, self.database.store(&Blob::new(target))?)
            } else {
                let content = self.workspace.read_file(path)?;
                let mode = NodeMode::from_executable(self.workspace.is_executable(path));
                (mode, self.database.store(&Blob::new(content))?)
            };

            if entry.depth() == 0 {
                tracing::debug!(oid = %oid, "stored workspace snapshot");
                return Ok(oid);
            }

            let name = entry
                .file_name()
                .to_str()
                .with_context(|| format!("File name {:?} is not UTF-8", path))?;
            self.pending
                .insert(path.to_path_buf(), TreeNode::new(name, mode, oid));
        }

        Err(InvariantError::MissingRootTree.into())
    }

    fn store_directory(&mut self, dir_path: &Path) -> anyhow::Result<ObjectId> {
        let mut nodes = Vec::new();

        for child in self.workspace.list_dir(dir_path)? {
            let node = self
                .pending
                .remove(&child)
                .ok_or_else(|| InvariantError::MissingPendingNode(child.display().to_string()))?;
            nodes.push(node);
        }

        self.database.store(&Tree::new(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::Object;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    fn snapshot(dir: &TempDir) -> (Database, ObjectId) {
        let database = Database::new(dir.path().join(".git/objects").into_boxed_path());
        let workspace = Workspace::new(dir.path().to_path_buf().into_boxed_path());
        let oid = SnapshotBuilder::new(&database, &workspace).build().unwrap();
        (database, oid)
    }

    #[test]
    fn empty_workspace_is_the_empty_tree() {
        let dir = TempDir::new().unwrap();
        let (_, oid) = snapshot(&dir);
        assert_eq!(oid.to_string(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    }

    #[test]
    fn flat_files_match_known_tree() {
        let dir = TempDir::new().unwrap();
        dir.child("a").write_str("a\n").unwrap();
        dir.child("b").write_str("b\n").unwrap();

        let (_, oid) = snapshot(&dir);
        assert_eq!(oid.to_string(), "3683f870be446c7cc05ffaef9fa06415276e1828");
    }

    #[test]
    fn nested_directories_become_subtrees() {
        let dir = TempDir::new().unwrap();
        dir.child("src/a").write_str("a\n").unwrap();

        let (database, oid) = snapshot(&dir);

        let root = database.parse_object_as_tree(&oid).unwrap();
        assert_eq!(root.nodes().len(), 1);
        let src = &root.nodes()[0];
        assert_eq!(src.name, "src");
        assert_eq!(src.mode, NodeMode::Directory);

        let subtree = database.parse_object_as_tree(&src.oid).unwrap();
        assert_eq!(
            subtree,
            Tree::new(vec![TreeNode::new(
                "a",
                NodeMode::File,
                Blob::new("a\n").object_id()
            )])
        );
    }

    #[test]
    fn hidden_entries_are_not_snapshotted() {
        let dir = TempDir::new().unwrap();
        dir.child("a").write_str("a\n").unwrap();
        dir.child("b").write_str("b\n").unwrap();
        dir.child(".env").write_str("secret").unwrap();
        dir.child("x/.keep").write_str("").unwrap();

        let (database, oid) = snapshot(&dir);
        let root = database.parse_object_as_tree(&oid).unwrap();
        let names = root
            .nodes()
            .iter()
            .map(|node| node.name.as_str())
            .collect::<Vec<_>>();

        // "x" only holds hidden content, so it is an empty subtree
        assert_eq!(names, vec!["a", "b", "x"]);
        assert_eq!(
            root.nodes()[2].oid.to_string(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[cfg(unix)]
    #[test]
    fn executables_and_symlinks_keep_their_modes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.child("run.sh");
        script.write_str("#!/bin/sh\n").unwrap();
        std::fs::set_permissions(script.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
        std::os::unix::fs::symlink("run.sh", dir.path().join("link")).unwrap();

        let (database, oid) = snapshot(&dir);
        let root = database.parse_object_as_tree(&oid).unwrap();

        assert_eq!(
            root.nodes(),
            &[
                TreeNode::new(
                    "link",
                    NodeMode::SymbolicLink,
                    Blob::new("run.sh").object_id()
                ),
                TreeNode::new(
                    "run.sh",
                    NodeMode::Executable,
                    Blob::new("#!/bin/sh\n").object_id()
                ),
            ]
        );
    }
}
