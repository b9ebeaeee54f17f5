use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Enumerates supported `DefinitionError` values.
pub enum DefinitionError {
    #[error("parameter '{display}' is already defined in this provider")]
    Duplicate { display: String },
    #[error("invalid parameter definition '{reference}': {reason}")]
    Invalid { reference: String, reason: String },
    #[error("provider is finalized; cannot define parameter '{long_name}'")]
    AlreadyFinalized { long_name: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Enumerates supported `ResolveError` values.
pub enum ResolveError {
    #[error("unknown parameter '{reference}'")]
    Unknown { reference: String },
    #[error("parameter reference '{reference}' is ambiguous; use one of: {}", .candidates.join(", "))]
    Ambiguous {
        reference: String,
        candidates: Vec<String>,
    },
    #[error("provider was not finalized before resolution")]
    NotFinalized,
}
