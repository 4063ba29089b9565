//! Working directory file system operations
//!
//! Every entry whose name starts with [`HIDDEN_MARKER`] is invisible to the
//! workspace: it is never snapshotted, never deleted, and hidden directories
//! are not descended into. This is what keeps the metadata directory out of
//! snapshots. The workspace root itself is exempt, whatever its name.

use crate::artifacts::objects::node_mode::NodeMode;
use anyhow::Context;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const HIDDEN_MARKER: u8 = b'.';

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_hidden(name: &OsStr) -> bool {
        name.as_encoded_bytes().first() == Some(&HIDDEN_MARKER)
    }

    /// Files, directories and symbolic links; anything else is ignored
    pub fn is_tracked_type(file_type: std::fs::FileType) -> bool {
        file_type.is_file() || file_type.is_dir() || file_type.is_symlink()
    }

    /// Every visible entry under the root, each one listed after all of its
    /// descendants. The root comes last.
    pub fn list_bottom_up(&self) -> anyhow::Result<Vec<DirEntry>> {
        let mut entries = WalkDir::new(&self.path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_hidden(entry.file_name()))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to walk workspace {:?}", self.path))?;

        // reversing a pre-order walk puts every directory after its contents
        entries.reverse();

        Ok(entries)
    }

    /// Visible, tracked entries directly inside `dir_path`
    pub fn list_dir(&self, dir_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut children = Vec::new();

        for entry in std::fs::read_dir(dir_path)
            .with_context(|| format!("Failed to list directory {:?}", dir_path))?
        {
            let entry = entry?;
            if Self::is_hidden(&entry.file_name()) || !Self::is_tracked_type(entry.file_type()?) {
                continue;
            }
            children.push(entry.path());
        }

        Ok(children)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        std::fs::read(file_path).with_context(|| format!("Failed to read file {:?}", file_path))
    }

    pub fn read_link(&self, link_path: &Path) -> anyhow::Result<String> {
        let target = std::fs::read_link(link_path)
            .with_context(|| format!("Failed to read symbolic link {:?}", link_path))?;

        target
            .into_os_string()
            .into_string()
            .map_err(|target| anyhow::anyhow!("Symbolic link target {:?} is not UTF-8", target))
    }

    pub fn is_executable(&self, file_path: &Path) -> bool {
        is_executable::is_executable(file_path)
    }

    /// Delete every visible file, symbolic link and (now) empty directory.
    ///
    /// Hidden entries are left alone, and so is any directory that still
    /// contains one.
    pub fn clear(&self) -> anyhow::Result<()> {
        for entry in self.list_bottom_up()? {
            if entry.depth() == 0 {
                continue;
            }
            let path = entry.path();

            if entry.file_type().is_dir() {
                let is_empty = std::fs::read_dir(path)
                    .with_context(|| format!("Failed to list directory {:?}", path))?
                    .next()
                    .is_none();
                if is_empty {
                    std::fs::remove_dir(path)
                        .with_context(|| format!("Failed to remove directory {:?}", path))?;
                }
            } else {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove file {:?}", path))?;
            }
        }

        Ok(())
    }

    pub fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        match std::fs::create_dir(dir_path) {
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir_path.is_dir() => Ok(()),
            result => {
                result.with_context(|| format!("Failed to create directory {:?}", dir_path))
            }
        }
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8], mode: NodeMode) -> anyhow::Result<()> {
        std::fs::write(file_path, data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        #[cfg(unix)]
        if let Some(bits) = mode.permissions() {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(bits);
            std::fs::set_permissions(file_path, permissions).with_context(|| {
                format!("Failed to set permissions for file: {:?}", file_path)
            })?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    pub fn make_symlink(&self, link_path: &Path, target: &str) -> anyhow::Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link_path).with_context(|| {
                format!("Failed to create symbolic link {:?} -> {}", link_path, target)
            })
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!(
                "Symbolic links are not supported on this platform: {:?} -> {}",
                link_path,
                target
            )
        }
    }
}
