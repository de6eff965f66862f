use std::fmt;
use std::str::FromStr;

/// Pipeline position of a document. Transitions are strictly forward through
/// the listed order; `Failed` is reachable from any non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    Pending,
    Extracting,
    Classifying,
    ExtractingEntities,
    Embedding,
    Persisting,
    Complete,
    Failed,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: DocumentStatus,
    pub to: DocumentStatus,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "PENDING",
            DocumentStatus::Extracting => "EXTRACTING",
            DocumentStatus::Classifying => "CLASSIFYING",
            DocumentStatus::ExtractingEntities => "EXTRACTING_ENTITIES",
            DocumentStatus::Embedding => "EMBEDDING",
            DocumentStatus::Persisting => "PERSISTING",
            DocumentStatus::Complete => "COMPLETE",
            DocumentStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Complete | DocumentStatus::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            DocumentStatus::Pending => 0,
            DocumentStatus::Extracting => 1,
            DocumentStatus::Classifying => 2,
            DocumentStatus::ExtractingEntities => 3,
            DocumentStatus::Embedding => 4,
            DocumentStatus::Persisting => 5,
            DocumentStatus::Complete => 6,
            DocumentStatus::Failed => 7,
        }
    }

    pub fn check_transition(&self, next: DocumentStatus) -> Result<(), InvalidTransition> {
        let invalid = InvalidTransition {
            from: *self,
            to: next,
        };

        if self.is_terminal() {
            return Err(invalid);
        }
        if next == DocumentStatus::Failed {
            return Ok(());
        }
        if next.rank() > self.rank() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DocumentStatus::Pending),
            "EXTRACTING" => Ok(DocumentStatus::Extracting),
            "CLASSIFYING" => Ok(DocumentStatus::Classifying),
            "EXTRACTING_ENTITIES" => Ok(DocumentStatus::ExtractingEntities),
            "EMBEDDING" => Ok(DocumentStatus::Embedding),
            "PERSISTING" => Ok(DocumentStatus::Persisting),
            "COMPLETE" => Ok(DocumentStatus::Complete),
            "FAILED" => Ok(DocumentStatus::Failed),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
