use serde::{Deserialize, Serialize};

use crate::errors::DefinitionError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `ParameterKind` values.
pub enum ParameterKind {
    /// Presence-only parameter; consumes no value token.
    Flag,
    /// Value-bearing parameter; consumes the next token verbatim.
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Enumerates supported `ParameterValue` values.
pub enum ParameterValue {
    Flag { set: bool },
    Text { text: String },
}

impl ParameterValue {
    pub fn flag(set: bool) -> Self {
        Self::Flag { set }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag { set } => Some(*set),
            Self::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Flag { .. } => None,
            Self::Text { text } => Some(text),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Public struct `ParameterDefinition` used across Cordon components.
///
/// Long names and scopes are stored bare (no `--` marker); the display form
/// is reconstructed via [`ParameterDefinition::display_name`].
pub struct ParameterDefinition {
    pub kind: ParameterKind,
    pub long_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_alias: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ParameterDefinition {
    pub fn flag(long_name: impl Into<String>) -> Self {
        Self::new(ParameterKind::Flag, long_name)
    }

    pub fn text(long_name: impl Into<String>) -> Self {
        Self::new(ParameterKind::Text, long_name)
    }

    fn new(kind: ParameterKind, long_name: impl Into<String>) -> Self {
        Self {
            kind,
            long_name: long_name.into(),
            short_alias: None,
            scope: None,
            group: None,
            required: false,
            default_value: None,
        }
    }

    pub fn short_alias(mut self, alias: char) -> Self {
        self.short_alias = Some(alias);
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Command-line form of this parameter: `--long-name` or `--scope:long-name`.
    pub fn display_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("--{scope}:{}", self.long_name),
            None => format!("--{}", self.long_name),
        }
    }

    /// Key used for scope-qualified lookup; scoped parameters only.
    pub(crate) fn qualified_key(&self) -> Option<String> {
        self.scope
            .as_ref()
            .map(|scope| format!("{scope}:{}", self.long_name))
    }

    pub(crate) fn validate(&self) -> Result<(), DefinitionError> {
        if !is_kebab_identifier(&self.long_name) {
            return Err(self.invalid(
                "long name must be a non-empty lower-case kebab identifier",
            ));
        }
        if let Some(scope) = &self.scope {
            if !is_kebab_identifier(scope) {
                return Err(self.invalid(
                    "scope must be a non-empty lower-case kebab identifier",
                ));
            }
        }
        if let Some(alias) = self.short_alias {
            if !alias.is_ascii_alphanumeric() {
                return Err(self.invalid("short alias must be a single alphanumeric character"));
            }
        }
        if self.kind == ParameterKind::Flag {
            if self.default_value.is_some() {
                return Err(self.invalid("a flag cannot carry a default value"));
            }
            if self.required {
                return Err(self.invalid("a flag cannot be required"));
            }
        }
        if self.required && self.default_value.is_some() {
            return Err(self.invalid("a required parameter cannot carry a default value"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> DefinitionError {
        DefinitionError::Invalid {
            reference: self.display_name(),
            reason: reason.to_string(),
        }
    }
}

fn is_kebab_identifier(name: &str) -> bool {
    if name.is_empty() || name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return false;
    }
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(first) => first,
        None => return false,
    };
    first.is_ascii_lowercase()
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
