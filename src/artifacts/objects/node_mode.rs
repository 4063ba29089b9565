use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::ParseError;

/// The kind of a tree entry, as encoded by its mode string
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NodeMode {
    File,
    Executable,
    Directory,
    SymbolicLink,
}

impl NodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeMode::File => "100644",
            NodeMode::Executable => "100755",
            NodeMode::Directory => "40000",
            NodeMode::SymbolicLink => "120000",
        }
    }

    /// Permission bits applied to restored regular files
    pub fn permissions(&self) -> Option<u32> {
        match self {
            NodeMode::File => Some(0o644),
            NodeMode::Executable => Some(0o755),
            NodeMode::Directory | NodeMode::SymbolicLink => None,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            NodeMode::Directory => ObjectType::Tree,
            NodeMode::File | NodeMode::Executable | NodeMode::SymbolicLink => ObjectType::Blob,
        }
    }

    pub fn from_executable(executable: bool) -> Self {
        if executable {
            NodeMode::Executable
        } else {
            NodeMode::File
        }
    }
}

impl TryFrom<&str> for NodeMode {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "100644" => Ok(NodeMode::File),
            "100755" => Ok(NodeMode::Executable),
            "40000" => Ok(NodeMode::Directory),
            "120000" => Ok(NodeMode::SymbolicLink),
            _ => Err(ParseError::UnknownMode(value.to_string())),
        }
    }
}

impl std::fmt::Display for NodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
