use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use anyhow::{Context, anyhow};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory inside the working root
pub const METADATA_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create working directory {:?}", path))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve working directory {:?}", path))?;

        let metadata_path = path.join(METADATA_DIR);
        let database = Database::new(metadata_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    /// Opens the repository whose working root is `start` or its nearest ancestor holding a
    /// metadata directory.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory {:?}", start))?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(METADATA_DIR).is_dir())
            .ok_or_else(|| {
                anyhow!(
                    "No {} repository found in {} or any parent directory",
                    METADATA_DIR,
                    start.display()
                )
            })?;

        tracing::debug!(root = %root.display(), "discovered repository");
        Self::new(&root.to_string_lossy(), writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
