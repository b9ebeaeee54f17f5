use cordon_params::{DefinitionError, ParameterRegistry};

use crate::invocation::Invocation;

/// Default group tag marking the flags that select a scope on a scoped
/// action; at least one such flag must be set before the `--` separator.
pub const SCOPING_GROUP: &str = "scoping";

pub(crate) type DefineParametersHook =
    Box<dyn Fn(&mut ParameterRegistry) -> Result<(), DefinitionError>>;
pub(crate) type ExecuteHook = Box<dyn FnMut(&Invocation) -> anyhow::Result<()>>;

/// An action with a single always-present parameter tier.
pub struct PlainAction {
    pub(crate) name: String,
    pub(crate) define_parameters: DefineParametersHook,
    pub(crate) execute: Option<ExecuteHook>,
}

impl PlainAction {
    pub fn new(
        name: impl Into<String>,
        define_parameters: impl Fn(&mut ParameterRegistry) -> Result<(), DefinitionError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            define_parameters: Box::new(define_parameters),
            execute: None,
        }
    }

    pub fn on_execute(
        mut self,
        execute: impl FnMut(&Invocation) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.execute = Some(Box::new(execute));
        self
    }
}

/// An action whose parameters split into an unscoped tier (always built)
/// and a scoped tier defined lazily, only once the `--` separator is
/// reached with a scoping flag set.
pub struct ScopedAction {
    pub(crate) name: String,
    pub(crate) scoping_group: String,
    pub(crate) define_unscoped: DefineParametersHook,
    pub(crate) define_scoped: DefineParametersHook,
    pub(crate) execute: Option<ExecuteHook>,
}

impl ScopedAction {
    pub fn new(
        name: impl Into<String>,
        define_unscoped: impl Fn(&mut ParameterRegistry) -> Result<(), DefinitionError> + 'static,
        define_scoped: impl Fn(&mut ParameterRegistry) -> Result<(), DefinitionError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            scoping_group: SCOPING_GROUP.to_string(),
            define_unscoped: Box::new(define_unscoped),
            define_scoped: Box::new(define_scoped),
            execute: None,
        }
    }

    pub fn with_scoping_group(mut self, group: impl Into<String>) -> Self {
        self.scoping_group = group.into();
        self
    }

    pub fn on_execute(
        mut self,
        execute: impl FnMut(&Invocation) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.execute = Some(Box::new(execute));
        self
    }
}

/// Enumerates supported `ActionDefinition` values.
pub enum ActionDefinition {
    Plain(PlainAction),
    Scoped(ScopedAction),
}

impl ActionDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(action) => &action.name,
            Self::Scoped(action) => &action.name,
        }
    }

    /// Runs the always-present definition hook into a fresh registry and
    /// finalizes it. Called once per parse, and once eagerly at
    /// registration for validation.
    pub(crate) fn build_unscoped_registry(&self) -> Result<ParameterRegistry, DefinitionError> {
        let hook = match self {
            Self::Plain(action) => &action.define_parameters,
            Self::Scoped(action) => &action.define_unscoped,
        };
        let mut registry = ParameterRegistry::new();
        (hook)(&mut registry)?;
        registry.finalize();
        Ok(registry)
    }

    pub(crate) fn run_execute(&mut self, invocation: &Invocation) -> anyhow::Result<()> {
        let execute = match self {
            Self::Plain(action) => &mut action.execute,
            Self::Scoped(action) => &mut action.execute,
        };
        match execute {
            Some(hook) => hook(invocation),
            None => Ok(()),
        }
    }
}

impl From<PlainAction> for ActionDefinition {
    fn from(action: PlainAction) -> Self {
        Self::Plain(action)
    }
}

impl From<ScopedAction> for ActionDefinition {
    fn from(action: ScopedAction) -> Self {
        Self::Scoped(action)
    }
}
