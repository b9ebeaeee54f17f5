use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{DefinitionError, ResolveError};
use crate::parameter_definition::{ParameterDefinition, ParameterKind, ParameterValue};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Public struct `ParameterHandle` used across Cordon components.
///
/// Opaque index into the [`ParameterRegistry`] that produced it; handles
/// from one registry must not be used against another.
pub struct ParameterHandle(pub(crate) usize);

#[derive(Debug, Clone)]
struct ParameterEntry {
    definition: ParameterDefinition,
    value: Option<ParameterValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegistryPhase {
    Defining,
    Finalized,
}

#[derive(Debug, Clone)]
/// One action tier's parameter set: mutable during the definition phase,
/// index-backed and resolvable after [`ParameterRegistry::finalize`].
///
/// Three indices cover the overlapping reference namespaces: short alias
/// to candidate list, long name to candidate list, and `scope:long` to a
/// unique entry. Duplicate (scope, long name) pairs are rejected at
/// definition time; shared aliases and cross-scope long names are legal
/// until an unqualified reference actually invokes them.
pub struct ParameterRegistry {
    entries: Vec<ParameterEntry>,
    phase: RegistryPhase,
    short_index: HashMap<char, Vec<usize>>,
    long_index: HashMap<String, Vec<usize>>,
    qualified_index: HashMap<String, usize>,
}

impl Default for ParameterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            phase: RegistryPhase::Defining,
            short_index: HashMap::new(),
            long_index: HashMap::new(),
            qualified_index: HashMap::new(),
        }
    }

    /// Registers one parameter. Fails on a duplicate (scope, long name)
    /// pair or on an invalid definition shape; rejected entirely once the
    /// registry is finalized.
    pub fn define(
        &mut self,
        definition: ParameterDefinition,
    ) -> Result<ParameterHandle, DefinitionError> {
        if self.phase == RegistryPhase::Finalized {
            return Err(DefinitionError::AlreadyFinalized {
                long_name: definition.long_name.clone(),
            });
        }
        definition.validate()?;
        let duplicate = self.entries.iter().any(|entry| {
            entry.definition.scope == definition.scope
                && entry.definition.long_name == definition.long_name
        });
        if duplicate {
            return Err(DefinitionError::Duplicate {
                display: definition.display_name(),
            });
        }
        self.entries.push(ParameterEntry {
            definition,
            value: None,
        });
        Ok(ParameterHandle(self.entries.len() - 1))
    }

    /// Closes the definition phase and builds the lookup indices. Further
    /// `define` calls are rejected; resolution becomes available.
    pub fn finalize(&mut self) {
        self.short_index.clear();
        self.long_index.clear();
        self.qualified_index.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(alias) = entry.definition.short_alias {
                self.short_index.entry(alias).or_default().push(index);
            }
            self.long_index
                .entry(entry.definition.long_name.clone())
                .or_default()
                .push(index);
            if let Some(key) = entry.definition.qualified_key() {
                // unique by the duplicate check in define()
                self.qualified_index.insert(key, index);
            }
        }
        self.phase = RegistryPhase::Finalized;
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == RegistryPhase::Finalized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = ParameterHandle> + '_ {
        (0..self.entries.len()).map(ParameterHandle)
    }

    // handles are only minted by define(); one presented with an index this
    // registry never issued came from a different registry
    fn entry(&self, handle: ParameterHandle) -> &ParameterEntry {
        match self.entries.get(handle.0) {
            Some(entry) => entry,
            None => panic!(
                "parameter handle {} does not belong to this registry",
                handle.0
            ),
        }
    }

    fn entry_mut(&mut self, handle: ParameterHandle) -> &mut ParameterEntry {
        match self.entries.get_mut(handle.0) {
            Some(entry) => entry,
            None => panic!(
                "parameter handle {} does not belong to this registry",
                handle.0
            ),
        }
    }

    pub fn definition(&self, handle: ParameterHandle) -> &ParameterDefinition {
        &self.entry(handle).definition
    }

    pub fn kind(&self, handle: ParameterHandle) -> ParameterKind {
        self.entry(handle).definition.kind
    }

    pub fn display_name(&self, handle: ParameterHandle) -> String {
        self.entry(handle).definition.display_name()
    }

    /// Resolves a short alias: one owner wins, several owners make the
    /// unqualified reference ambiguous, none is unknown.
    pub fn resolve_short(&self, alias: char) -> Result<ParameterHandle, ResolveError> {
        if self.phase != RegistryPhase::Finalized {
            return Err(ResolveError::NotFinalized);
        }
        let reference = format!("-{alias}");
        match self.short_index.get(&alias).map(Vec::as_slice) {
            Some([index]) => Ok(ParameterHandle(*index)),
            Some(indices) if indices.len() > 1 => Err(self.ambiguous(&reference, indices)),
            _ => Err(ResolveError::Unknown { reference }),
        }
    }

    /// Resolves a long reference, either `name` or `scope:name` (leading
    /// dashes already stripped by the caller).
    ///
    /// A qualified reference is an exact lookup. An unqualified reference
    /// resolves when exactly one parameter anywhere in this provider
    /// carries the long name, regardless of that parameter's own scope.
    pub fn resolve_long(&self, reference: &str) -> Result<ParameterHandle, ResolveError> {
        if self.phase != RegistryPhase::Finalized {
            return Err(ResolveError::NotFinalized);
        }
        let display = format!("--{reference}");
        if reference.contains(':') {
            return match self.qualified_index.get(reference) {
                Some(index) => Ok(ParameterHandle(*index)),
                None => Err(ResolveError::Unknown { reference: display }),
            };
        }
        match self.long_index.get(reference).map(Vec::as_slice) {
            Some([index]) => Ok(ParameterHandle(*index)),
            Some(indices) if indices.len() > 1 => Err(self.ambiguous(&display, indices)),
            _ => Err(ResolveError::Unknown { reference: display }),
        }
    }

    fn ambiguous(&self, reference: &str, indices: &[usize]) -> ResolveError {
        ResolveError::Ambiguous {
            reference: reference.to_string(),
            candidates: indices
                .iter()
                .map(|index| self.entries[*index].definition.display_name())
                .collect(),
        }
    }

    /// Assigns a value; re-assignment within one parse overwrites the
    /// previous value (last occurrence wins).
    pub fn assign(&mut self, handle: ParameterHandle, value: ParameterValue) {
        self.entry_mut(handle).value = Some(value);
    }

    pub fn value(&self, handle: ParameterHandle) -> Option<&ParameterValue> {
        self.entry(handle).value.as_ref()
    }

    /// Assigned value, falling back to the declared default for text
    /// parameters. Unset flags yield `None`.
    pub fn effective_value(&self, handle: ParameterHandle) -> Option<ParameterValue> {
        let entry = self.entry(handle);
        if let Some(value) = &entry.value {
            return Some(value.clone());
        }
        entry
            .definition
            .default_value
            .as_deref()
            .map(ParameterValue::text)
    }

    /// Convenience lookup by reference string after a parse; `None` when
    /// the reference is unknown or ambiguous.
    pub fn handle_of(&self, reference: &str) -> Option<ParameterHandle> {
        self.resolve_long(reference).ok()
    }

    /// Clears every value slot so the registry can serve a fresh parse.
    pub fn reset_values(&mut self) {
        for entry in &mut self.entries {
            entry.value = None;
        }
    }

    /// Display names of every required parameter lacking both an assigned
    /// value and a default, in definition order.
    pub fn unmet_required(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| {
                entry.definition.required
                    && entry.value.is_none()
                    && entry.definition.default_value.is_none()
            })
            .map(|entry| entry.definition.display_name())
            .collect()
    }

    /// True when any flag tagged with `group` has been set in this parse.
    pub fn group_selected(&self, group: &str) -> bool {
        self.entries.iter().any(|entry| {
            entry.definition.group.as_deref() == Some(group)
                && matches!(entry.value, Some(ParameterValue::Flag { set: true }))
        })
    }

    /// True when any flag tagged with `group` is defined at all.
    pub fn group_defined(&self, group: &str) -> bool {
        self.entries.iter().any(|entry| {
            entry.definition.group.as_deref() == Some(group)
                && entry.definition.kind == ParameterKind::Flag
        })
    }

    /// Deterministic display-name-to-rendered-value map for inspection.
    /// Flags always appear; text parameters appear once they have an
    /// assigned or default value.
    pub fn value_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for handle in self.handles() {
            let definition = self.definition(handle);
            match definition.kind {
                ParameterKind::Flag => {
                    let set = self
                        .value(handle)
                        .and_then(ParameterValue::as_flag)
                        .unwrap_or(false);
                    map.insert(definition.display_name(), set.to_string());
                }
                ParameterKind::Text => {
                    if let Some(value) = self.effective_value(handle) {
                        if let Some(text) = value.as_text() {
                            map.insert(definition.display_name(), text.to_string());
                        }
                    }
                }
            }
        }
        map
    }
}
