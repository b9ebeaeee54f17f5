use crate::action::ActionDefinition;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::errors::{ParseError, RouterError};
use crate::invocation::Invocation;
use crate::scoping::run_scoped;
use crate::token_resolver::{ScanStop, TokenResolver};

/// Maps the first positional token to exactly one registered action and
/// drives the parse for it. Caller-owned; there is no process-wide
/// registry.
#[derive(Default)]
pub struct ActionRouter {
    actions: Vec<ActionDefinition>,
}

impl ActionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its unique name. The unscoped definition
    /// hook runs once into a throwaway registry here so duplicate or
    /// malformed parameter definitions surface at registration, not first
    /// use; a scoped action must tag at least one unscoped flag with its
    /// scoping group.
    pub fn register(&mut self, action: impl Into<ActionDefinition>) -> Result<(), RouterError> {
        let action = action.into();
        if self.actions.iter().any(|known| known.name() == action.name()) {
            return Err(RouterError::DuplicateAction {
                name: action.name().to_string(),
            });
        }
        let registry = action.build_unscoped_registry()?;
        if let ActionDefinition::Scoped(scoped) = &action {
            if !registry.group_defined(&scoped.scoping_group) {
                return Err(RouterError::MissingScopingParameter {
                    action: scoped.name.clone(),
                });
            }
        }
        tracing::debug!(action = action.name(), "registered action");
        self.actions.push(action);
        Ok(())
    }

    /// Exact-name routing only; no abbreviation or fuzzy matching.
    pub fn route(&self, name: &str) -> Result<&ActionDefinition, ParseError> {
        self.actions
            .iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| ParseError::UnknownAction {
                name: name.to_string(),
                registered: self.action_names(),
            })
    }

    pub fn action_names(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|action| action.name().to_string())
            .collect()
    }

    /// Parses one token stream: routes the action, builds its registries
    /// fresh, and resolves every remaining token. Errors propagate to the
    /// caller untouched.
    pub fn parse(&self, tokens: &[String]) -> Result<Invocation, ParseError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Err(ParseError::MissingAction {
                registered: self.action_names(),
            });
        };
        let action = self.route(first)?;
        tracing::debug!(action = action.name(), tokens = rest.len(), "routed action");
        match action {
            ActionDefinition::Plain(plain) => {
                let mut registry = action.build_unscoped_registry()?;
                let mut iter = rest.iter().map(String::as_str);
                let stop = TokenResolver::new(&mut registry).scan(&mut iter)?;
                if stop == ScanStop::Separator {
                    // reserved for scoped actions; trailing content after a
                    // bare separator has no meaning here
                    if let Some(extra) = iter.next() {
                        return Err(ParseError::UnexpectedToken {
                            token: extra.to_string(),
                        });
                    }
                }
                let missing = registry.unmet_required();
                if !missing.is_empty() {
                    return Err(ParseError::MissingRequired { missing });
                }
                Ok(Invocation::new(&plain.name, registry, None))
            }
            ActionDefinition::Scoped(scoped) => run_scoped(scoped, rest),
        }
    }

    /// Parses and, on success, runs the selected action's execute hook.
    /// Any failure is written to the diagnostic sink at error severity
    /// before being returned.
    pub fn dispatch(
        &mut self,
        tokens: &[String],
        sink: &mut dyn DiagnosticSink,
    ) -> anyhow::Result<Invocation> {
        let invocation = match self.parse(tokens) {
            Ok(invocation) => invocation,
            Err(error) => {
                sink.write(&error.to_string(), Severity::Error);
                return Err(error.into());
            }
        };
        let selected = self
            .actions
            .iter_mut()
            .find(|action| action.name() == invocation.action_name());
        if let Some(action) = selected {
            if let Err(error) = action.run_execute(&invocation) {
                sink.write(
                    &format!("action '{}' failed: {error:#}", invocation.action_name()),
                    Severity::Error,
                );
                return Err(error);
            }
        }
        Ok(invocation)
    }
}
