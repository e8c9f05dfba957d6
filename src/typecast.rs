//! Depth-bounded typecast walk over a record.
//!
//! The walk visits maps and lists in order, classifies every entry through
//! [`crate::classifier::classify`] and replaces matching entries in place.
//! The shape of the tree never changes: keys, list lengths and positions are
//! left exactly as they were.

use crate::classifier::classify;
use crate::error::ConfigError;
use crate::value::Value;
use regex::Regex;
use tracing::{debug, trace};

/// `max_depth` value that disables the depth bound.
pub const DISABLED_MAX_DEPTH: usize = 0;

/// Only the root container's own entries are converted by default.
pub const DEFAULT_MAX_DEPTH: usize = 1;

/// Depth at which the root container is visited.
pub const ROOT_DEPTH: usize = 1;

/// Record typecaster.
///
/// Immutable once built, so a single instance can be shared between worker
/// threads that each filter their own records.
#[derive(Debug, Clone)]
pub struct Typecaster {
    max_depth: usize,
    ignore_key_pattern: Option<Regex>,
}

impl Default for Typecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Typecaster {
    /// Create a typecaster with the default depth and no ignored keys.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_key_pattern: None,
        }
    }

    pub fn builder() -> TypecasterBuilder {
        TypecasterBuilder::default()
    }

    /// Configured depth bound; `0` means unlimited.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn ignore_key_pattern(&self) -> Option<&str> {
        self.ignore_key_pattern.as_ref().map(|re| re.as_str())
    }

    /// Typecast a record and hand it back.
    pub fn filter(&self, mut record: Value) -> Value {
        self.apply(&mut record);
        record
    }

    /// Typecast a record in place.
    ///
    /// Returns the number of entries whose value changed. A scalar record
    /// is left alone: scalars are only converted as entries of a container.
    pub fn apply(&self, record: &mut Value) -> usize {
        let converted = self.walk(record, ROOT_DEPTH);
        debug!(converted, root = record.kind(), "typecast record");
        converted
    }

    /// Walk `node`, which sits at container depth `depth`.
    ///
    /// Entries of a container within the bound are converted even when the
    /// bound stops the walk from entering their own children.
    pub fn walk(&self, node: &mut Value, depth: usize) -> usize {
        if self.beyond_max_depth(depth) {
            return 0;
        }

        match node {
            Value::Map(map) => map
                .iter_mut()
                .map(|(key, value)| self.transform(key, value, depth))
                .sum(),
            Value::List(items) => items
                .iter_mut()
                .enumerate()
                .map(|(index, value)| self.transform(&index.to_string(), value, depth))
                .sum(),
            Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Timestamp(_)
            | Value::Binary(_) => 0,
        }
    }

    fn transform(&self, key: &str, value: &mut Value, depth: usize) -> usize {
        let mut converted = 0;

        if !self.is_ignored(key) {
            let replacement = value
                .scalar_text()
                .and_then(|text| classify(&text).into_value());

            if let Some(replacement) = replacement {
                if replacement != *value {
                    trace!(key, depth, from = value.kind(), to = replacement.kind(), "typecast entry");
                    *value = replacement;
                    converted += 1;
                }
            }
        }

        converted + self.walk(value, depth + 1)
    }

    fn beyond_max_depth(&self, depth: usize) -> bool {
        self.max_depth != DISABLED_MAX_DEPTH && self.max_depth < depth
    }

    fn is_ignored(&self, key: &str) -> bool {
        self.ignore_key_pattern
            .as_ref()
            .map_or(false, |re| re.is_match(key))
    }
}

/// Builder for [`Typecaster`].
#[derive(Debug, Clone)]
pub struct TypecasterBuilder {
    max_depth: usize,
    ignore_key_pattern: Option<String>,
}

impl Default for TypecasterBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_key_pattern: None,
        }
    }
}

impl TypecasterBuilder {
    /// Bound the walk to `depth` container levels; `0` removes the bound.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn unlimited_depth(self) -> Self {
        self.max_depth(DISABLED_MAX_DEPTH)
    }

    /// Leave entries whose key (or list index) matches `pattern` unconverted.
    ///
    /// The pattern is searched anywhere in the key; anchor it to match whole
    /// keys.
    pub fn ignore_key_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_key_pattern = Some(pattern.into());
        self
    }

    pub fn build(self) -> Result<Typecaster, ConfigError> {
        let ignore_key_pattern = self
            .ignore_key_pattern
            .map(|pattern| {
                Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern { pattern, source })
            })
            .transpose()?;

        Ok(Typecaster {
            max_depth: self.max_depth,
            ignore_key_pattern,
        })
    }
}
