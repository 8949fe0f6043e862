//! Transformer composition
//!
//! A [`TransformerChain`] runs its steps in order, feeding each step the
//! previous step's output. The first step that omits a field ends the chain,
//! so no later step can bring an omitted field back.

use super::transformer::{Field, FieldFn, FieldTransformer, Redaction};
use super::value::LogValue;
use std::fmt;
use std::sync::Arc;

/// Replacer accepted from configuration or from a single log call
#[derive(Clone)]
pub enum Replacer {
    Function(FieldFn),
    Keys(Vec<String>),
}

impl Replacer {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Field<'_>, LogValue) -> Option<LogValue> + Send + Sync + 'static,
    {
        Replacer::Function(Arc::new(f))
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Replacer::Keys(keys.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::Function(_) => write!(f, "Function(..)"),
            Replacer::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
        }
    }
}

/// Instance-level settings that shape every call's chain
#[derive(Debug, Clone, Default)]
pub struct ChainSettings {
    pub replacer: Option<Replacer>,
    /// `true`: key lists are include lists; `false`: exclude lists
    pub array_includes: bool,
    pub always_include_keys: Vec<String>,
    pub always_exclude_values: Vec<LogValue>,
    pub excluded_value: Redaction,
}

/// Ordered transformer steps evaluated as one
#[derive(Debug, Clone, Default)]
pub struct TransformerChain {
    steps: Vec<Option<FieldTransformer>>,
}

impl TransformerChain {
    /// Compose the given steps. `None` slots are skipped.
    pub fn compose<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Option<FieldTransformer>>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Build the chain for one log call.
    ///
    /// The call-site replacer wins over the configured one. Key lists become
    /// include or exclude lists per `array_includes`; include lists always let
    /// `always_include_keys` through. Value redaction runs next, then error
    /// normalization.
    pub fn for_call(settings: &ChainSettings, call_site: Option<&Replacer>) -> Self {
        let base = call_site
            .or(settings.replacer.as_ref())
            .map(|replacer| match replacer {
                Replacer::Function(f) => FieldTransformer::Function(Arc::clone(f)),
                Replacer::Keys(keys) if settings.array_includes => {
                    FieldTransformer::include_keys(keys.iter().cloned())
                        .with_pinned(settings.always_include_keys.iter().cloned())
                }
                Replacer::Keys(keys) => FieldTransformer::exclude_keys(keys.iter().cloned()),
            });

        let blacklist = if settings.always_exclude_values.is_empty() {
            None
        } else {
            Some(FieldTransformer::value_blacklist(
                settings.always_exclude_values.clone(),
                settings.excluded_value.clone(),
            ))
        };

        Self::compose([base, blacklist, Some(FieldTransformer::error_normalizer())])
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn apply(&self, field: &Field<'_>, value: LogValue) -> Option<LogValue> {
        let mut result = value;
        for step in self.steps.iter().flatten() {
            result = step.apply(field, result)?;
        }
        Some(result)
    }
}
