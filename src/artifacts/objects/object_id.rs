//! Object identifier (SHA-1 hash)
//!
//! An object ID is the 20-byte SHA-1 digest of an object's canonical
//! serialization. Its textual form is 40 lowercase hex characters.
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_BYTES, base16};
use crate::errors::ParseError;
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: &str) -> Result<Self, ParseError> {
        let bytes = base16::decode(id)?;
        let bytes: [u8; OBJECT_ID_BYTES] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| ParseError::InvalidObjectIdLength {
                length: bytes.len(),
            })?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        base16::encode(&self.0)
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Used when serializing tree entries.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut buffer = [0; OBJECT_ID_BYTES];
        reader.read_exact(&mut buffer)?;

        Ok(Self(buffer))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(7);
        hex
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}
