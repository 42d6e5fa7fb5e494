use crate::path::Path;
use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(String),

    #[error("No node at path {0}")]
    InvalidPath(Path),

    #[error("Node at {0} is not a text run")]
    NotText(Path),

    #[error("Node at {0} is not an element")]
    NotElement(Path),

    #[error("Offset {offset} is out of range for text at {path}")]
    OffsetOutOfRange { path: Path, offset: usize },
}

impl DocumentError {
    pub fn offset_out_of_range(path: &Path, offset: usize) -> Self {
        Self::OffsetOutOfRange {
            path: path.clone(),
            offset,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e.to_string())
    }
}
