use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed store of zlib-compressed loose objects
///
/// Objects live at `<objects>/<2-hex bucket>/<38-hex rest>` and are read-only
/// once written. Storing content that is already present is a no-op.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Load an object's inflated bytes, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        self.read_object(self.object_path(object_id))
            .with_context(|| format!("object {} not found", object_id))
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.object_path(&object_id);

        // the existence check and the write are not atomic, which is fine as
        // long as a given path only ever holds the same bytes
        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let bucket = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(bucket).context(format!(
            "Unable to create object directory {}",
            bucket.display()
        ))?;

        self.write_object(object_path, object.serialize())?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let raw = self.load(object_id)?;
        ObjectBox::parse(&raw).with_context(|| format!("Unable to parse object {}", object_id))
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let raw = self.load(object_id)?;
        Blob::deserialize(&raw).with_context(|| format!("Unable to parse blob {}", object_id))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let raw = self.load(object_id)?;
        Tree::deserialize(&raw).with_context(|| format!("Unable to parse tree {}", object_id))
    }

    /// Read only the tree ID of a stored commit
    pub fn commit_tree_oid(&self, commit_id: &ObjectId) -> anyhow::Result<ObjectId> {
        let raw = self.load(commit_id)?;
        Commit::extract_tree_oid(&raw)
            .with_context(|| format!("Unable to read tree of commit {}", commit_id))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        let written = Self::fill_object_file(file, &object_content, &temp_object_path).and_then(
            |()| {
                std::fs::rename(&temp_object_path, &object_path).context(format!(
                    "Unable to rename object file to {}",
                    object_path.display()
                ))
            },
        );

        // the temp file is ours, so it goes whenever the object did not land
        if written.is_err()
            && let Err(e) = std::fs::remove_file(&temp_object_path)
        {
            tracing::warn!(
                path = %temp_object_path.display(),
                error = %e,
                "failed to remove temp object file"
            );
        }

        written
    }

    fn fill_object_file(
        mut file: std::fs::File,
        object_content: &[u8],
        temp_object_path: &Path,
    ) -> anyhow::Result<()> {
        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // objects are immutable once written
        let mut permissions = file.metadata()?.permissions();
        permissions.set_readonly(true);
        file.set_permissions(permissions).context(format!(
            "Unable to mark object file {} read-only",
            temp_object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
