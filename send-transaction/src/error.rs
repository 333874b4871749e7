use core::fmt;

/// Errors returned when submitting a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTransactionError {
    /// The serialized transaction was empty.
    EmptyTransaction,
    /// The request never got an answer from the node.
    Transport(String),
    /// The node answered with a JSON-RPC error.
    Rejected { code: i64, message: String },
}

impl fmt::Display for SendTransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTransaction => f.write_str("transaction is empty"),
            Self::Transport(reason) => write!(f, "transport error: {reason}"),
            Self::Rejected { code, message } => {
                write!(f, "transaction rejected ({code}): {message}")
            }
        }
    }
}

impl core::error::Error for SendTransactionError {}
