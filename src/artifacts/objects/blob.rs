//! Blob object
//!
//! Blobs store file content. They contain only the raw data, without any
//! metadata like file name or permissions (those are stored in trees). A
//! symbolic link is stored as a blob holding its UTF-8 target path.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, expect_object};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn body(&self) -> Bytes {
        self.content.clone()
    }
}

impl Unpackable for Blob {
    fn deserialize(raw: &[u8]) -> anyhow::Result<Self> {
        let body = expect_object(raw, ObjectType::Blob)?;
        Ok(Self::new(Bytes::copy_from_slice(body)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn serializes_with_blob_header() {
        let blob = Blob::new("what is up, doc?");
        assert_eq!(&blob.serialize()[..], b"blob 16\0what is up, doc?");
    }

    #[test]
    fn hashes_known_vector() {
        let blob = Blob::new("what is up, doc?");
        assert_eq!(
            blob.object_id().to_string(),
            "bd9dbf5aae1a3862dd1526723246b20206e5fc37"
        );
    }

    #[test]
    fn identical_content_shares_object_path() {
        let left = Blob::new(b"same bytes".to_vec());
        let right = Blob::new(b"same bytes".to_vec());
        assert_eq!(left.object_id().to_path(), right.object_id().to_path());
    }

    #[test]
    fn deserialize_rejects_length_mismatch() {
        let error = Blob::deserialize(b"blob 3\0hello").unwrap_err();
        assert_eq!(
            error.downcast_ref::<ParseError>(),
            Some(&ParseError::LengthMismatch {
                declared: 3,
                actual: 5
            })
        );
    }

    #[test]
    fn deserialize_rejects_other_tags() {
        let error = Blob::deserialize(b"tree 0\0").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ParseError>(),
            Some(ParseError::UnexpectedObjectType { .. })
        ));
    }

    proptest! {
        #[test]
        fn deserialize_inverts_serialize(content in proptest::collection::vec(any::<u8>(), 0..256)) {
            let blob = Blob::new(content);
            let parsed = Blob::deserialize(&blob.serialize()).unwrap();
            prop_assert_eq!(parsed, blob);
        }
    }
}
