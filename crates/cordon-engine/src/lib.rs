//! Action routing, token resolution, and scoped-tier orchestration for Cordon.
//!
//! The first positional token selects an action; the remaining tokens are
//! resolved against that action's parameter registry. Scoped actions parse
//! in two phases, switching to a lazily built second registry at the `--`
//! separator once a scoping selector has been set. A failed parse yields no
//! parameter values at all.

mod action;
mod action_router;
mod diagnostics;
mod errors;
mod invocation;
mod scoping;
mod token_resolver;

pub use action::{ActionDefinition, PlainAction, ScopedAction, SCOPING_GROUP};
pub use action_router::ActionRouter;
pub use diagnostics::{BufferedSink, DiagnosticSink, Severity, TracingSink};
pub use errors::{ParseError, RouterError};
pub use invocation::Invocation;
