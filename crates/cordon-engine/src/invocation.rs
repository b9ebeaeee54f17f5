use std::collections::BTreeMap;

use cordon_params::{ParameterRegistry, ParameterValue};

#[derive(Debug, Clone)]
/// Public struct `Invocation` used across Cordon components.
///
/// The fully resolved result of one successful parse: the selected action
/// name plus its populated parameter tier(s). Produced all-or-nothing; a
/// failed parse never yields one.
pub struct Invocation {
    action: String,
    unscoped: ParameterRegistry,
    scoped: Option<ParameterRegistry>,
}

impl Invocation {
    pub(crate) fn new(
        action: &str,
        unscoped: ParameterRegistry,
        scoped: Option<ParameterRegistry>,
    ) -> Self {
        Self {
            action: action.to_string(),
            unscoped,
            scoped,
        }
    }

    pub fn action_name(&self) -> &str {
        &self.action
    }

    pub fn unscoped(&self) -> &ParameterRegistry {
        &self.unscoped
    }

    /// The scoped tier; present for scoped actions even when the separator
    /// never appeared (with zero assigned values in that case).
    pub fn scoped(&self) -> Option<&ParameterRegistry> {
        self.scoped.as_ref()
    }

    /// Looks up a reference (`name` or `scope:name`) in the unscoped tier
    /// first, then the scoped tier, returning the assigned-or-default
    /// value. A reference the unscoped tier can resolve answers from that
    /// tier even when unset.
    pub fn value_of(&self, reference: &str) -> Option<ParameterValue> {
        if let Some(handle) = self.unscoped.handle_of(reference) {
            return self.unscoped.effective_value(handle);
        }
        let scoped = self.scoped.as_ref()?;
        let handle = scoped.handle_of(reference)?;
        scoped.effective_value(handle)
    }

    pub fn text_of(&self, reference: &str) -> Option<String> {
        self.value_of(reference)
            .and_then(|value| value.as_text().map(str::to_string))
    }

    pub fn flag_of(&self, reference: &str) -> bool {
        self.value_of(reference)
            .and_then(|value| value.as_flag())
            .unwrap_or(false)
    }

    /// Deterministic merged view of both tiers for inspection; scoped
    /// entries override unscoped ones on a display-name collision.
    pub fn value_map(&self) -> BTreeMap<String, String> {
        let mut map = self.unscoped.value_map();
        if let Some(scoped) = &self.scoped {
            map.extend(scoped.value_map());
        }
        map
    }
}
