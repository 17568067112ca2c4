use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Malformed Newick input
    #[error("Parse error at line {line}, column {column}:\n{message}\nSnippet: \"{snippet}\"")]
    ParseError {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The column number (1-based)
        column: usize,
        /// The snippet of input where the error occurred
        snippet: String,
    },
    /// Structural problem in an otherwise parsable tree, or an invalid operation
    #[error("Tree logic error: {0}")]
    LogicError(String),
}

impl From<String> for TreeError {
    fn from(msg: String) -> Self {
        TreeError::LogicError(msg)
    }
}
