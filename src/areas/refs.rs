//! References (branches and HEAD)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: Containing a commit SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! References are stored as text files under the metadata root containing
//! either a 40-character SHA-1 hash or `ref: <name>`, followed by a newline.
//!
//! ## Resolution
//!
//! Symbolic references are followed until a reference that is direct or does
//! not exist yet ("unborn"). Resolution gives up after [`MAX_REDIRECTS`] reads;
//! this bound is the only protection against reference cycles.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference::{Reference, ReferenceContent};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::ParseError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Maximum number of reference files read while resolving one name
pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata root (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    /// Read a reference, or `None` if its file does not exist
    pub fn read_ref(&self, name: &str) -> anyhow::Result<Option<Reference>> {
        let path = self.ref_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = ReferenceContent::parse(name, &content)?;

        Ok(Some(Reference::new(name, content)))
    }

    /// Overwrite a reference file, creating parent directories as needed
    pub fn write_ref(&self, reference: &Reference) -> anyhow::Result<()> {
        let path = self.ref_path(&reference.name);

        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(&path, format!("{}\n", reference.content))
            .with_context(|| format!("failed to write ref file at {:?}", path))?;
        tracing::debug!(name = %reference.name, content = %reference.content, "wrote reference");

        Ok(())
    }

    /// Follow symbolic references starting at `name`.
    ///
    /// Returns the name of the last reference in the chain: either one whose
    /// file does not exist, or one holding a direct object ID.
    pub fn resolve(&self, name: &str) -> anyhow::Result<String> {
        let mut name = name.to_string();

        for _ in 0..MAX_REDIRECTS {
            match self.read_ref(&name)? {
                Some(Reference {
                    content: ReferenceContent::Symbolic(target),
                    ..
                }) => {
                    tracing::debug!(from = %name, to = %target, "following symbolic reference");
                    name = target;
                }
                Some(_) | None => return Ok(name),
            }
        }

        Err(ParseError::TooManyRedirects(name).into())
    }

    /// Resolve `name` and read the commit it ultimately points at, if any
    pub fn read_oid(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let resolved = self.resolve(name)?;

        match self.read_ref(&resolved)? {
            Some(Reference {
                content: ReferenceContent::Direct(oid),
                ..
            }) => Ok(Some(oid)),
            Some(_) | None => Ok(None),
        }
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_oid(HEAD_REF_NAME)
    }

    pub fn set_head(&self, content: ReferenceContent) -> anyhow::Result<()> {
        self.write_ref(&Reference::new(HEAD_REF_NAME, content))
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.ref_path(&branch_name.ref_name()).is_file()
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            anyhow::bail!("branch {} already exists", name);
        }

        self.write_ref(&Reference::new(
            name.ref_name(),
            ReferenceContent::Direct(source_oid),
        ))
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
