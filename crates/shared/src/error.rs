use thiserror::Error;

/// Reasons an inbound message cannot be turned into a [`crate::protocol::Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("`{verb}` needs at least {expected} fields, got {actual}")]
    Malformed {
        verb: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown verb `{0}`")]
    UnknownVerb(String),
    #[error("unknown `{verb}` subtype `{subtype}`")]
    UnknownSubtype { verb: String, subtype: String },
    #[error("malformed button payload `{0}`")]
    MalformedButton(String),
}
