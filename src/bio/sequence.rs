use serde::{Deserialize, Serialize};

/// Identifier reported for records that carry no name
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub identifier: Option<String>,
    pub description: Option<String>,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(identifier: Option<String>, sequence: String) -> Self {
        Self {
            identifier: identifier.filter(|id| !id.is_empty()),
            description: None,
            sequence,
        }
    }

    pub fn named(identifier: &str, sequence: &str) -> Self {
        Self::new(Some(identifier.to_string()), sequence.to_string())
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// Identifier, or `"Unknown"` when the input had none
    pub fn display_id(&self) -> &str {
        self.identifier.as_deref().unwrap_or(UNKNOWN_IDENTIFIER)
    }

    /// Number of residues (characters, not bytes)
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn header(&self) -> String {
        let mut header = format!(">{}", self.identifier.as_deref().unwrap_or(""));

        if let Some(desc) = &self.description {
            header.push(' ');
            header.push_str(desc);
        }

        header
    }
}
