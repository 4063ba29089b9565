use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::REF_PREFIX;
use crate::artifacts::branch::reference::{Reference, ReferenceContent};
use crate::artifacts::objects::commit::{Commit, Identity, Signature, Timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::snapshot::builder::SnapshotBuilder;
use std::io::Write;

impl Repository {
    /// Snapshot the working directory and record it on top of HEAD.
    ///
    /// The reference HEAD resolves to (the current branch, or HEAD itself when
    /// detached) is moved to the new commit.
    pub fn commit(
        &self,
        identity: &Identity,
        timestamp: Timestamp,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let head_ref = self.refs().resolve(HEAD_REF_NAME)?;
        let parent = self.refs().read_oid(&head_ref)?;

        let tree_oid = SnapshotBuilder::new(self.database(), self.workspace()).build()?;

        let signature = Signature::new(identity.clone(), timestamp);
        let commit = Commit::new(
            tree_oid,
            parent.into_iter().collect(),
            signature.clone(),
            signature,
            message,
        );
        let commit_id = self.database().store(&commit)?;

        self.refs()
            .write_ref(&Reference::new(head_ref.as_str(), ReferenceContent::Direct(commit_id)))?;
        tracing::info!(oid = %commit_id, reference = %head_ref, "created commit");

        let label = if head_ref == HEAD_REF_NAME {
            "detached HEAD"
        } else {
            head_ref.strip_prefix(REF_PREFIX).unwrap_or(&head_ref)
        };
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            label,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
