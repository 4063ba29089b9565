use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch pointing at the commit HEAD currently resolves to
    pub fn branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = self
            .refs()
            .read_head()?
            .ok_or_else(|| anyhow::anyhow!("no current HEAD to branch from"))?;

        self.refs().create_branch(&branch_name, source_oid)?;
        tracing::info!(branch = %branch_name, oid = %source_oid, "created branch");

        Ok(())
    }
}
