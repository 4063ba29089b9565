//! Commit object
//!
//! Commits record a snapshot of the working directory at a point in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer signatures
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The message always ends with exactly one newline appended by serialization
//! unless it already ends in one.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, expect_object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::ParseError;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

/// Name and email of an author or committer
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Identity {
    #[new(into)]
    name: String,
    #[new(into)]
    email: String,
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

impl TryFrom<&str> for Identity {
    type Error = ParseError;

    // Format: "name <email>"
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let malformed = || ParseError::MalformedIdentity(value.to_string());

        let email_start = value.find('<').ok_or_else(malformed)?;
        let email_end = value.rfind('>').ok_or_else(malformed)?;
        if email_end < email_start || email_end != value.len() - 1 {
            return Err(malformed());
        }

        let name = value[..email_start].trim_end().to_string();
        let email = value[email_start + 1..email_end].to_string();

        Ok(Identity { name, email })
    }
}

/// Seconds since the epoch together with the UTC offset they were recorded in
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp(chrono::Local::now().fixed_offset())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0.timestamp(), self.0.format("%z"))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = ParseError;

    // Format: "<unix-seconds> <+HHMM>"
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::MalformedTimestamp(value.to_string());

        let (seconds, offset) = value.split_once(' ').ok_or_else(malformed)?;
        let seconds = seconds.parse::<i64>().map_err(|_| malformed())?;

        let (sign, digits) = match offset.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => return Err(malformed()),
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let hours = digits[..2].parse::<i32>().map_err(|_| malformed())?;
        let minutes = digits[2..].parse::<i32>().map_err(|_| malformed())?;
        if minutes >= 60 {
            return Err(malformed());
        }
        let offset_seconds = sign * (hours * 3600 + minutes * 60);

        let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(malformed)?;
        let datetime = DateTime::from_timestamp(seconds, 0).ok_or_else(malformed)?;

        Ok(Timestamp(datetime.with_timezone(&offset)))
    }
}

/// Who did something, and when
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Signature {
    identity: Identity,
    timestamp: Timestamp,
}

impl Signature {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.identity, self.timestamp)
    }
}

impl TryFrom<&str> for Signature {
    type Error = ParseError;

    // Format: "name <email> timestamp timezone"
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Split from the right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(ParseError::MalformedCommit(format!(
                "invalid signature {value:?}"
            )));
        }

        let timestamp = format!("{} {}", parts[1], parts[0]).parse::<Timestamp>()?;
        let identity = Identity::try_from(parts[2])?;

        Ok(Signature::new(identity, timestamp))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs, in the order they were supplied
    parents: Vec<ObjectId>,
    author: Signature,
    committer: Signature,
    message: String,
}

impl Commit {
    pub fn new(
        tree_oid: ObjectId,
        parents: Vec<ObjectId>,
        author: Signature,
        committer: Signature,
        message: impl Into<String>,
    ) -> Self {
        Commit {
            tree_oid,
            parents,
            author,
            committer,
            message: message.into(),
        }
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Read the tree ID out of raw commit bytes without parsing the rest.
    ///
    /// Only the object header and the leading `tree ` line are examined.
    pub fn extract_tree_oid(raw: &[u8]) -> anyhow::Result<ObjectId> {
        let body = expect_object(raw, ObjectType::Commit)?;

        let line = body
            .strip_prefix(b"tree ")
            .ok_or_else(|| ParseError::MalformedCommit("missing tree line".to_string()))?;
        let (hex, rest) = line
            .split_at_checked(OBJECT_ID_LENGTH)
            .ok_or_else(|| ParseError::MalformedCommit("truncated tree line".to_string()))?;
        if rest.first() != Some(&b'\n') {
            return Err(ParseError::MalformedCommit("unterminated tree line".to_string()).into());
        }

        let hex = std::str::from_utf8(hex)
            .map_err(|_| ParseError::MalformedCommit("tree id is not text".to_string()))?;

        Ok(ObjectId::try_parse(hex)?)
    }

    fn text(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author));
        lines.push(format!("committer {}", self.committer));
        lines.push(String::new());
        lines.push(self.message.clone());

        let mut text = lines.join("\n");
        if !self.message.ends_with('\n') {
            text.push('\n');
        }
        text
    }
}

impl Packable for Commit {
    fn body(&self) -> Bytes {
        Bytes::from(self.text())
    }
}

impl Unpackable for Commit {
    fn deserialize(raw: &[u8]) -> anyhow::Result<Self> {
        let body = expect_object(raw, ObjectType::Commit)?;
        let content = std::str::from_utf8(body)
            .map_err(|_| ParseError::MalformedCommit("body is not valid UTF-8".to_string()))?;

        let malformed = |reason: &str| ParseError::MalformedCommit(reason.to_string());

        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| malformed("missing blank line before message"))?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| malformed("missing tree line"))?;
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        // Parse all parent lines (there can be 0, 1, or multiple parents)
        let mut parents = Vec::new();
        let mut next_line = lines.next().ok_or_else(|| malformed("missing author line"))?;
        while let Some(parent) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent)?);
            next_line = lines.next().ok_or_else(|| malformed("missing author line"))?;
        }

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| malformed("invalid author line"))?;
        let author = Signature::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| malformed("missing committer line"))?;
        let committer = Signature::try_from(committer)?;

        if lines.next().is_some() {
            return Err(malformed("unexpected header after committer").into());
        }

        Ok(Commit::new(tree_oid, parents, author, committer, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.text()
    }
}
