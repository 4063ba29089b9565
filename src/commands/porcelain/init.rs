use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference::ReferenceContent;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        let metadata_path = self.metadata_path();

        if metadata_path.exists() {
            tracing::info!(path = %metadata_path.display(), "repository already initialized");
            writeln!(
                self.writer(),
                "Reinitialized existing repository in {}",
                metadata_path.display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .git/refs/tags directory")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head(ReferenceContent::Symbolic(default_branch.ref_name()))
            .context("Failed to create initial HEAD reference")?;

        tracing::info!(path = %metadata_path.display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            metadata_path.display()
        )?;

        Ok(())
    }
}
