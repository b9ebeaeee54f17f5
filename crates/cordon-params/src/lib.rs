//! Parameter data model and resolution registry for Cordon.
//!
//! Defines parameter metadata (kind, long name, short alias, scope, group,
//! required/default) plus the per-provider registry that builds alias,
//! long-name, and scope-qualified indices and detects ambiguous or unknown
//! references at parse time.

mod errors;
mod parameter_definition;
mod parameter_registry;

pub use errors::{DefinitionError, ResolveError};
pub use parameter_definition::{ParameterDefinition, ParameterKind, ParameterValue};
pub use parameter_registry::{ParameterHandle, ParameterRegistry};
