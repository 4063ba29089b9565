use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::ParseError;
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

pub trait Packable {
    /// The object's body, without the `<type> <size>\0` header
    fn body(&self) -> Bytes;
}

pub trait Unpackable {
    /// Parse an object from its full inflated bytes (header included)
    fn deserialize(raw: &[u8]) -> anyhow::Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn serialize(&self) -> Bytes {
        canonical_bytes(self.object_type(), &self.body())
    }

    fn object_id(&self) -> ObjectId {
        digest(&self.serialize())
    }
}

/// Wrap a body in the loose object envelope: `<tag> <decimal-length>\0<body>`
pub fn canonical_bytes(object_type: ObjectType, body: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), body.len());

    let mut bytes = BytesMut::with_capacity(header.len() + body.len());
    bytes.put_slice(header.as_bytes());
    bytes.put_slice(body);
    bytes.freeze()
}

/// SHA-1 of an object's full serialized bytes
pub fn digest(bytes: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(bytes);

    ObjectId::from_bytes(hasher.finalize().into())
}

/// Split raw object bytes into their declared type and a length-checked body.
pub fn split_object(raw: &[u8]) -> Result<(ObjectType, &[u8]), ParseError> {
    let (tag, declared, body) = header_fields(raw)?;
    let object_type = ObjectType::try_from(tag)?;
    check_length(declared, body)?;

    Ok((object_type, body))
}

/// Like [`split_object`], but fails unless the header carries the `expected` tag.
pub fn expect_object(raw: &[u8], expected: ObjectType) -> Result<&[u8], ParseError> {
    let (tag, declared, body) = header_fields(raw)?;
    if tag != expected.as_str() {
        return Err(ParseError::UnexpectedObjectType {
            expected: expected.to_string(),
            found: tag.to_string(),
        });
    }
    check_length(declared, body)?;

    Ok(body)
}

fn header_fields(raw: &[u8]) -> Result<(&str, usize, &[u8]), ParseError> {
    let nul = raw
        .iter()
        .position(|&b| b == 0)
        .ok_or(ParseError::MissingNul)?;
    let (header, body) = (&raw[..nul], &raw[nul + 1..]);

    let malformed = || ParseError::MalformedHeader {
        header: String::from_utf8_lossy(header).into_owned(),
    };

    let header = std::str::from_utf8(header).map_err(|_| malformed())?;
    let (tag, length) = header.split_once(' ').ok_or_else(malformed)?;
    if length.is_empty() || !length.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let declared = length.parse::<usize>().map_err(|_| malformed())?;

    Ok((tag, declared, body))
}

fn check_length(declared: usize, body: &[u8]) -> Result<(), ParseError> {
    if declared != body.len() {
        return Err(ParseError::LengthMismatch {
            declared,
            actual: body.len(),
        });
    }

    Ok(())
}

/// An object of any type, as loaded from the database
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectBox {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl ObjectBox {
    pub fn parse(raw: &[u8]) -> anyhow::Result<Self> {
        let (object_type, _) = split_object(raw)?;

        Ok(match object_type {
            ObjectType::Blob => ObjectBox::Blob(Blob::deserialize(raw)?),
            ObjectType::Tree => ObjectBox::Tree(Tree::deserialize(raw)?),
            ObjectType::Commit => ObjectBox::Commit(Commit::deserialize(raw)?),
        })
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
