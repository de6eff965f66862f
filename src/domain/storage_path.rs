use std::fmt;

use super::DocumentId;

/// Location of the raw uploaded file inside the file store, recorded on the
/// document at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// Builds `{document_id}/{filename}`. The client-supplied name is
    /// reduced to its final path segment, so a name carrying `../` or
    /// absolute components cannot point outside the store.
    pub fn new(document_id: &DocumentId, filename: &str) -> Self {
        let name = filename
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .unwrap_or("upload.pdf");
        Self(format!("{}/{}", document_id.as_uuid(), name))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
