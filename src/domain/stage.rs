use std::fmt;

/// Pipeline stage names, used in failure reporting and reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ExtractText,
    Classify,
    ExtractEntities,
    Chunk,
    Embed,
    PersistEntities,
    PersistVectors,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ExtractText => "extract_text",
            Stage::Classify => "classify",
            Stage::ExtractEntities => "extract_entities",
            Stage::Chunk => "chunk",
            Stage::Embed => "embed",
            Stage::PersistEntities => "persist_entities",
            Stage::PersistVectors => "persist_vectors",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
