//! Reference values
//!
//! A reference file holds either `ref: <target>` (symbolic) or a 40-character
//! hex object ID (direct), terminated by a newline.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::ParseError;
use anyhow::Context;
use derive_new::new;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceContent {
    /// Points straight at a commit
    Direct(ObjectId),
    /// Points at another reference by name
    Symbolic(String),
}

impl ReferenceContent {
    /// Parse the content of the reference file `name`
    pub fn parse(name: &str, content: &str) -> anyhow::Result<Self> {
        let content = content.strip_suffix('\n').unwrap_or(content);

        let symref_match = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?
            .captures(content);
        if let Some(symref_match) = symref_match {
            return Ok(ReferenceContent::Symbolic(symref_match[1].to_string()));
        }

        let oid = ObjectId::try_parse(content).map_err(|e| ParseError::MalformedReference {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(ReferenceContent::Direct(oid))
    }
}

impl std::fmt::Display for ReferenceContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceContent::Direct(oid) => write!(f, "{}", oid),
            ReferenceContent::Symbolic(target) => write!(f, "ref: {}", target),
        }
    }
}

/// A named pointer, e.g. `HEAD` or `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Reference {
    #[new(into)]
    pub name: String,
    pub content: ReferenceContent,
}
