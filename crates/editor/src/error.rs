//! Editor error types

use shared::BlockIndex;

/// How the host should surface an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocking alert; the operation was aborted
    Alert,
    /// Non-fatal notification
    Notice,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("block {index} has name {name:?} without a \"<scene>-\" prefix")]
    InvalidSceneKey { index: BlockIndex, name: String },
    #[error("block {index} has {count} points, at least 3 are required")]
    TooFewPoints { index: BlockIndex, count: usize },
    #[error("block index {index} appears more than once")]
    DuplicateIndex { index: BlockIndex },
    #[error("malformed {what}: {source}")]
    MalformedFile {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl EditorError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::InvalidSceneKey { .. } | Self::TooFewPoints { .. } | Self::DuplicateIndex { .. } => {
                Severity::Alert
            }
            Self::MalformedFile { .. } => Severity::Notice,
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
