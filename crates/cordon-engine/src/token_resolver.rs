use cordon_params::{ParameterKind, ParameterRegistry, ParameterValue, ResolveError};

use crate::errors::ParseError;

pub(crate) const SEPARATOR_TOKEN: &str = "--";
const LONG_MARKER: &str = "--";
const SHORT_MARKER: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `ScanStop` values.
pub(crate) enum ScanStop {
    Exhausted,
    Separator,
}

/// Per-parse scan over the tokens remaining after the action token,
/// resolving each reference against one finalized registry and assigning
/// values as it goes.
pub(crate) struct TokenResolver<'a> {
    registry: &'a mut ParameterRegistry,
}

impl<'a> TokenResolver<'a> {
    pub(crate) fn new(registry: &'a mut ParameterRegistry) -> Self {
        Self { registry }
    }

    /// Consumes tokens until the stream ends or the literal `--` separator
    /// is reached. The separator is never treated as a parameter
    /// reference; the iterator is left positioned just past it so the
    /// caller can hand the remainder to another registry.
    pub(crate) fn scan<'t, I>(&mut self, tokens: &mut I) -> Result<ScanStop, ParseError>
    where
        I: Iterator<Item = &'t str>,
    {
        while let Some(token) = tokens.next() {
            if token == SEPARATOR_TOKEN {
                return Ok(ScanStop::Separator);
            }
            let handle = if let Some(reference) = token.strip_prefix(LONG_MARKER) {
                self.registry.resolve_long(reference)?
            } else if let Some(rest) = token.strip_prefix(SHORT_MARKER) {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(alias), None) => self.registry.resolve_short(alias)?,
                    // bundled or empty short forms are not a reference shape
                    _ => {
                        return Err(ResolveError::Unknown {
                            reference: token.to_string(),
                        }
                        .into())
                    }
                }
            } else {
                return Err(ParseError::UnexpectedToken {
                    token: token.to_string(),
                });
            };
            match self.registry.kind(handle) {
                ParameterKind::Flag => {
                    self.registry.assign(handle, ParameterValue::flag(true));
                }
                ParameterKind::Text => {
                    let Some(value) = tokens.next() else {
                        return Err(ParseError::MissingArgument {
                            parameter: self.registry.display_name(handle),
                        });
                    };
                    // taken verbatim, even when it looks like a reference
                    self.registry.assign(handle, ParameterValue::text(value));
                }
            }
            tracing::debug!(
                token,
                parameter = %self.registry.display_name(handle),
                "assigned parameter"
            );
        }
        Ok(ScanStop::Exhausted)
    }
}
