use crate::libs::phylo::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonoError {
    #[error("Not able to read a newick tree from {path}: {source}")]
    TreeParse {
        path: String,
        #[source]
        source: TreeError,
    },

    #[error("Malformed mapping file {path}: {message}")]
    MalformedMapping { path: String, message: String },

    #[error("{0} does not match any tip found in this tree")]
    TipNotFound(String),

    #[error("Tip {0} was passed to the monophyly test but is not a leaf of the tree")]
    UnknownTip(String),

    #[error("Rooting needs 2 to 5 tips, got {0}")]
    OutgroupSize(usize),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl MonoError {
    pub(crate) fn malformed(path: &str, message: impl Into<String>) -> Self {
        MonoError::MalformedMapping {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
