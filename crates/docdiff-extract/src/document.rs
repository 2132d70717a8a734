use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

/// The format of a document, derived from its file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Docx,
    Pdf,
    Text,
}

impl DocumentKind {
    /// Detect the kind from a file name or path. Case-insensitive.
    pub fn from_name(name: &str) -> ExtractResult<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            "txt" | "text" | "md" => Ok(Self::Text),
            _ => Err(ExtractError::UnknownKind(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named document held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Build a document from in-memory bytes; the kind comes from `name`.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> ExtractResult<Self> {
        let name = name.into();
        let kind = DocumentKind::from_name(&name)?;
        Ok(Self {
            name,
            kind,
            bytes: bytes.into(),
        })
    }

    /// Read a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let name = path.to_string_lossy().into_owned();
        let kind = DocumentKind::from_name(&name)?;
        let bytes = std::fs::read(path)?;
        Ok(Self { name, kind, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
