use cordon_params::{DefinitionError, ParameterRegistry};

use crate::action::{DefineParametersHook, ScopedAction};
use crate::errors::ParseError;
use crate::invocation::Invocation;
use crate::token_resolver::{ScanStop, TokenResolver};

/// Lazily built scoped tier: the definition hook runs at most once per
/// parse, on the first demand for the registry.
pub(crate) struct ScopedTier<'a> {
    hook: &'a DefineParametersHook,
    built: Option<ParameterRegistry>,
}

impl<'a> ScopedTier<'a> {
    pub(crate) fn new(hook: &'a DefineParametersHook) -> Self {
        Self { hook, built: None }
    }

    pub(crate) fn build(&mut self) -> Result<&mut ParameterRegistry, DefinitionError> {
        match self.built {
            Some(ref mut registry) => Ok(registry),
            None => {
                let mut registry = ParameterRegistry::new();
                (self.hook)(&mut registry)?;
                registry.finalize();
                tracing::debug!(parameters = registry.len(), "built scoped parameter tier");
                Ok(self.built.insert(registry))
            }
        }
    }

    pub(crate) fn into_built(self) -> Option<ParameterRegistry> {
        self.built
    }
}

/// Two-phase parse for a scoped action.
///
/// Phase 1 resolves against the unscoped tier until the stream ends or the
/// `--` separator appears. Crossing the separator requires a set scoping
/// flag; only then is the scoped tier defined, finalized, and handed the
/// remaining tokens. Ambiguity detection in phase 2 is independent of
/// phase 1. When the separator never appears the scoped tier still gets
/// built for the final required-parameter scan, but parses nothing.
pub(crate) fn run_scoped(action: &ScopedAction, tokens: &[String]) -> Result<Invocation, ParseError> {
    let mut unscoped = ParameterRegistry::new();
    (action.define_unscoped)(&mut unscoped)?;
    unscoped.finalize();

    let mut iter = tokens.iter().map(String::as_str);
    let stop = TokenResolver::new(&mut unscoped).scan(&mut iter)?;

    let mut tier = ScopedTier::new(&action.define_scoped);
    if stop == ScanStop::Separator {
        if !unscoped.group_selected(&action.scoping_group) {
            return Err(ParseError::MissingScope {
                action: action.name.clone(),
            });
        }
        tracing::debug!(action = %action.name, "entering scoped tier");
        let scoped = tier.build()?;
        if TokenResolver::new(scoped).scan(&mut iter)? == ScanStop::Separator {
            // a second separator has no meaning; a bare trailing one is
            // ignored, anything after it is not
            if let Some(extra) = iter.next() {
                return Err(ParseError::UnexpectedToken {
                    token: extra.to_string(),
                });
            }
        }
    } else {
        tier.build()?;
    }

    let scoped = tier.into_built();
    let mut missing = unscoped.unmet_required();
    if let Some(registry) = &scoped {
        missing.extend(registry.unmet_required());
    }
    if !missing.is_empty() {
        return Err(ParseError::MissingRequired { missing });
    }
    Ok(Invocation::new(&action.name, unscoped, scoped))
}
