use cordon_params::{DefinitionError, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Registration-time failures; programmer errors raised eagerly at
/// `register`, never deferred to first use.
pub enum RouterError {
    #[error("action '{name}' is already registered")]
    DuplicateAction { name: String },
    #[error("scoped action '{action}' defines no scoping flag; tag at least one unscoped flag with its scoping group")]
    MissingScopingParameter { action: String },
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

#[derive(Debug, Error)]
/// Enumerates supported `ParseError` values.
///
/// Every variant aborts the whole parse; no parameter values survive a
/// failed invocation.
pub enum ParseError {
    #[error("no action given; registered actions: {}", .registered.join(", "))]
    MissingAction { registered: Vec<String> },
    #[error("unknown action '{name}'; registered actions: {}", .registered.join(", "))]
    UnknownAction {
        name: String,
        registered: Vec<String>,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("parameter {parameter} expects a value but the command line ended")]
    MissingArgument { parameter: String },
    #[error("missing required parameter(s): {}", .missing.join(", "))]
    MissingRequired { missing: Vec<String> },
    #[error("scoped action '{action}' reached '--' without a scope selector; set one of its scoping flags first")]
    MissingScope { action: String },
    #[error("unexpected token '{token}'")]
    UnexpectedToken { token: String },
    // scoped-tier hooks run lazily, so their definition errors surface here
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
