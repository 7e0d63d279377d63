use thiserror::Error;

/// Errors surfaced by collection clients.
///
/// Persistence problems never show up here: the storage layer degrades to a
/// fallback value and logs instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Record rejected by {collection}: {reason}")]
    Rejected { collection: &'static str, reason: String },
    #[error("Duplicate id in {collection}: {id}")]
    DuplicateId { collection: &'static str, id: String },
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

/// Errors raised by a persistence backend. Caught at the [`KeyedStore`]
/// boundary and converted into fallbacks.
///
/// [`KeyedStore`]: crate::storage::KeyedStore
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// User-facing failures of the donation workflow. The `Display` text is what
/// the error view shows.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowFailure {
    #[error("Payment was not completed. You can try again or use another method.")]
    PaymentNotCompleted { status: String },
    #[error(
        "We did not receive a payment response in time. If you were charged, please contact Brisk with your transaction reference."
    )]
    PaymentTimedOut { tx_ref: String, waited_secs: u64 },
    #[error(
        "We received a payment response but failed to record the donation properly. Please contact Brisk with your transaction reference."
    )]
    RecordingFailed { tx_ref: String, reason: String },
}

impl WorkflowFailure {
    /// Transaction reference to quote to support, when one exists.
    pub fn tx_ref(&self) -> Option<&str> {
        match self {
            WorkflowFailure::PaymentNotCompleted { .. } => None,
            WorkflowFailure::PaymentTimedOut { tx_ref, .. } | WorkflowFailure::RecordingFailed { tx_ref, .. } => {
                Some(tx_ref)
            }
        }
    }
}
