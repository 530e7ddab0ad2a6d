//! Engine configuration
//!
//! Limits and collector tuning for a [`Context`](crate::Context). Values can
//! be set in code or read from `FLATHEAD_*` environment variables.

use std::env;

use thiserror::Error;

use crate::runtime::MAX_PROTOTYPE_CHAIN;

/// Default number of allocations between implicit collections; implicit
/// collection is off unless the host opts in
pub const DEFAULT_GC_THRESHOLD: usize = 0;

/// Default maximum depth of nested calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Default cap on the number of elements an array may hold
pub const DEFAULT_MAX_DENSE_LENGTH: usize = 1 << 22;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Allocations since the last collection that trigger an implicit one
    /// at the next safepoint (0 disables implicit collection)
    pub gc_threshold: usize,

    /// Maximum number of prototype links followed by a lookup
    pub max_prototype_depth: usize,

    /// Maximum call depth
    pub max_call_depth: usize,

    /// Largest length an array may grow to; arrays are dense, so every
    /// element up to the length is allocated
    pub max_dense_length: usize,

    /// Install the `gc()` global function
    pub expose_gc: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            gc_threshold: DEFAULT_GC_THRESHOLD,
            max_prototype_depth: MAX_PROTOTYPE_CHAIN,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_dense_length: DEFAULT_MAX_DENSE_LENGTH,
            expose_gc: cfg!(feature = "expose-gc"),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gc_threshold(mut self, threshold: usize) -> Self {
        self.gc_threshold = threshold;
        self
    }

    pub fn with_max_prototype_depth(mut self, depth: usize) -> Self {
        self.max_prototype_depth = depth;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_max_dense_length(mut self, length: usize) -> Self {
        self.max_dense_length = length;
        self
    }

    pub fn with_expose_gc(mut self, expose: bool) -> Self {
        self.expose_gc = expose;
        self
    }

    /// Build a configuration from the environment, starting from the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("FLATHEAD_GC_THRESHOLD") {
            config.gc_threshold = parse_usize("FLATHEAD_GC_THRESHOLD", v)?;
        }
        if let Some(v) = lookup("FLATHEAD_MAX_PROTOTYPE_DEPTH") {
            config.max_prototype_depth = parse_usize("FLATHEAD_MAX_PROTOTYPE_DEPTH", v)?;
        }
        if let Some(v) = lookup("FLATHEAD_MAX_CALL_DEPTH") {
            config.max_call_depth = parse_usize("FLATHEAD_MAX_CALL_DEPTH", v)?;
        }
        if let Some(v) = lookup("FLATHEAD_MAX_DENSE_LENGTH") {
            config.max_dense_length = parse_usize("FLATHEAD_MAX_DENSE_LENGTH", v)?;
        }
        if let Some(v) = lookup("FLATHEAD_EXPOSE_GC") {
            config.expose_gc = parse_bool("FLATHEAD_EXPOSE_GC", v)?;
        }

        Ok(config)
    }
}

fn parse_usize(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value,
        expected: "a non-negative integer",
    })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value,
            expected: "a boolean",
        }),
    }
}
