//! Typecast filter configuration.
//!
//! Loads filter options from YAML (or JSON, which YAML accepts) and compiles
//! them into a [`Typecaster`]. Two depth policies are recognised: the numeric
//! `maxdepth` and the boolean `deep_dive` shorthand.

use crate::error::ConfigError;
use crate::typecast::{Typecaster, DEFAULT_MAX_DEPTH, DISABLED_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Filter options as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypecastConfig {
    /// Container levels to descend into (0 = unlimited, default 1)
    #[serde(default, alias = "max_depth", skip_serializing_if = "Option::is_none")]
    pub maxdepth: Option<usize>,

    /// Keys matching this regex are left unconverted
    #[serde(default, alias = "ignore_key_pattern", skip_serializing_if = "Option::is_none")]
    pub ignore_key_regexp: Option<String>,

    /// `true` descends without bound, `false` converts root entries only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_dive: Option<bool>,
}

impl TypecastConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Example
    /// ```ignore
    /// use auto_typecast::TypecastConfig;
    ///
    /// let caster = TypecastConfig::load_from_file("config/auto_typecast.yaml")?.build()?;
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text. Empty text yields the defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(contents)?)
    }

    /// Layer command line options over the file options.
    ///
    /// An explicit depth replaces whichever depth policy the file chose, so
    /// `max_depth` clears `deep_dive` and `deep_dive` clears `maxdepth`.
    pub fn with_overrides(
        mut self,
        max_depth: Option<usize>,
        deep_dive: bool,
        ignore_key_regexp: Option<String>,
    ) -> Self {
        if let Some(depth) = max_depth {
            self.maxdepth = Some(depth);
            self.deep_dive = None;
        }
        if deep_dive {
            self.maxdepth = None;
            self.deep_dive = Some(true);
        }
        if let Some(pattern) = ignore_key_regexp {
            self.ignore_key_regexp = Some(pattern);
        }
        self
    }

    /// Resolve the depth policy to a numeric bound.
    pub fn resolved_max_depth(&self) -> Result<usize, ConfigError> {
        match (self.maxdepth, self.deep_dive) {
            (Some(_), Some(_)) => Err(ConfigError::Conflict(
                "'maxdepth' and 'deep_dive' cannot both be set".to_string(),
            )),
            (Some(depth), None) => Ok(depth),
            (None, Some(true)) => Ok(DISABLED_MAX_DEPTH),
            (None, Some(false)) | (None, None) => Ok(DEFAULT_MAX_DEPTH),
        }
    }

    /// Validate and compile into a typecaster.
    pub fn build(&self) -> Result<Typecaster, ConfigError> {
        let mut builder = Typecaster::builder().max_depth(self.resolved_max_depth()?);

        if let Some(pattern) = &self.ignore_key_regexp {
            builder = builder.ignore_key_pattern(pattern.clone());
        }

        builder.build()
    }
}
