use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::node_mode::NodeMode;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::Path;

/// Materializes a stored tree under the workspace root
pub struct Restorer<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl<'r> Restorer<'r> {
    pub fn new(database: &'r Database, workspace: &'r Workspace) -> Self {
        Restorer {
            database,
            workspace,
        }
    }

    pub fn restore(&self, tree_oid: &ObjectId) -> anyhow::Result<()> {
        self.restore_tree(tree_oid, self.workspace.path())
    }

    fn restore_tree(&self, tree_oid: &ObjectId, dir_path: &Path) -> anyhow::Result<()> {
        let tree = self.database.parse_object_as_tree(tree_oid)?;

        for node in tree.into_nodes() {
            Self::check_name(&node.name)?;
            let path = dir_path.join(&node.name);

            match node.mode {
                NodeMode::Directory => {
                    self.workspace.make_directory(&path)?;
                    self.restore_tree(&node.oid, &path)?;
                }
                NodeMode::File | NodeMode::Executable => {
                    let blob = self.database.parse_object_as_blob(&node.oid)?;
                    self.workspace.write_file(&path, blob.content(), node.mode)?;
                }
                NodeMode::SymbolicLink => {
                    let blob = self.database.parse_object_as_blob(&node.oid)?;
                    let target = std::str::from_utf8(blob.content()).with_context(|| {
                        format!("Symbolic link target for {:?} is not UTF-8", path)
                    })?;
                    self.workspace.make_symlink(&path, target)?;
                }
            }
            tracing::trace!(path = %path.display(), mode = %node.mode, "restored entry");
        }

        Ok(())
    }

    /// Entry names must stay inside the directory they are restored into
    fn check_name(name: &str) -> anyhow::Result<()> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            anyhow::bail!("Refusing to restore tree entry named {:?}", name);
        }

        Ok(())
    }
}
