use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference::ReferenceContent;
use crate::artifacts::checkout::restorer::Restorer;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Replace the visible working tree with the tree of `target` and move HEAD.
    ///
    /// `target` names an existing branch (HEAD becomes symbolic) or is a full
    /// commit ID (HEAD becomes detached). Everything that can fail without
    /// touching the working tree is done first; once clearing starts there is
    /// no rollback.
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let (new_head, commit_oid) = self.resolve_checkout_target(target)?;
        let tree_oid = self.database().commit_tree_oid(&commit_oid)?;

        self.workspace()
            .clear()
            .context("Failed to clear the working tree")?;
        Restorer::new(self.database(), self.workspace())
            .restore(&tree_oid)
            .with_context(|| format!("Failed to restore tree {}", tree_oid))?;

        self.refs().set_head(new_head.clone())?;
        tracing::info!(name = %target, oid = %commit_oid, "checked out");

        match new_head {
            ReferenceContent::Symbolic(_) => {
                writeln!(self.writer(), "Switched to branch '{}'", target)?
            }
            ReferenceContent::Direct(oid) => {
                writeln!(self.writer(), "HEAD is now at {}", oid.to_short_oid())?
            }
        }

        Ok(())
    }

    fn resolve_checkout_target(&self, target: &str) -> anyhow::Result<(ReferenceContent, ObjectId)> {
        if let Ok(branch_name) = BranchName::try_parse(target.to_string())
            && self.refs().branch_exists(&branch_name)
        {
            let ref_name = branch_name.ref_name();
            let oid = self
                .refs()
                .read_oid(&ref_name)?
                .ok_or_else(|| anyhow::anyhow!("branch {} does not point at a commit", branch_name))?;

            return Ok((ReferenceContent::Symbolic(ref_name), oid));
        }

        let oid = ObjectId::try_parse(target)
            .with_context(|| format!("{} is neither a branch nor a commit id", target))?;

        Ok((ReferenceContent::Direct(oid), oid))
    }
}
